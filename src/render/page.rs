use crate::db::models::StudentRecord;
use crate::service::form_workflow::{Notice, NoticeLevel, RecordView, TABLE_HEADERS};
use crate::types::form::{MAX_AGE, MIN_AGE, Nationality, Submission, Title};
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }
fieldset { margin-bottom: 1rem; }
label { display: block; margin: 0.4rem 0; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
.notice { padding: 0.6rem; margin: 1rem 0; border-radius: 4px; }
.notice.success { background: #e6f4ea; }
.notice.warning { background: #fff4e5; }
.notice.info { background: #e8f0fe; }
"#;

/// Render the entry form, an optional notice for the last submission, and the
/// record table. `form` refills the inputs with what the user last posted.
pub fn render_page(notice: Option<&Notice>, view: &RecordView, form: Option<&Submission>) -> String {
    let blank = Submission::default();
    let form = form.unwrap_or(&blank);

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Student Data Entry Form</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Student Data Entry Form</h1>\n");

    push_form(&mut html, form);
    if let Some(notice) = notice {
        push_notice(&mut html, notice);
    }

    html.push_str("<h2>Student Data Records</h2>\n");
    match view {
        RecordView::Rows(rows) => push_table(&mut html, rows),
        RecordView::Empty(notice) => push_notice(&mut html, notice),
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_form(html: &mut String, form: &Submission) {
    html.push_str("<form method=\"post\" action=\"/\">\n");

    html.push_str("<fieldset><legend>User Information</legend>\n");
    let _ = writeln!(
        html,
        "<label>First Name <input type=\"text\" name=\"first_name\" value=\"{}\"></label>",
        escape_html(&form.first_name)
    );
    let _ = writeln!(
        html,
        "<label>Last Name <input type=\"text\" name=\"last_name\" value=\"{}\"></label>",
        escape_html(&form.last_name)
    );
    html.push_str("<label>Title <select name=\"title\">");
    for title in Title::ALL {
        push_option(html, title.as_str(), title == form.title);
    }
    html.push_str("</select></label>\n");
    let _ = writeln!(
        html,
        "<label>Age <input type=\"number\" name=\"age\" min=\"{MIN_AGE}\" max=\"{MAX_AGE}\" step=\"1\" value=\"{}\"></label>",
        escape_html(&form.age.raw())
    );
    html.push_str("<label>Nationality <select name=\"nationality\">");
    for nationality in Nationality::ALL {
        push_option(html, nationality.as_str(), nationality == form.nationality);
    }
    html.push_str("</select></label>\n</fieldset>\n");

    html.push_str("<fieldset><legend>Course Information</legend>\n");
    let _ = writeln!(
        html,
        "<label><input type=\"checkbox\" name=\"registered\" value=\"true\"{}> Currently Registered</label>",
        checked(form.registered)
    );
    let _ = writeln!(
        html,
        "<label>Number of Completed Courses <input type=\"number\" name=\"num_courses\" min=\"0\" step=\"1\" value=\"{}\"></label>",
        escape_html(&form.num_courses.raw())
    );
    let _ = writeln!(
        html,
        "<label>Number of Semesters <input type=\"number\" name=\"num_semesters\" min=\"0\" step=\"1\" value=\"{}\"></label>",
        escape_html(&form.num_semesters.raw())
    );
    html.push_str("</fieldset>\n");

    html.push_str("<fieldset><legend>Terms &amp; Conditions</legend>\n");
    let _ = writeln!(
        html,
        "<label><input type=\"checkbox\" name=\"accept_terms\" value=\"true\"{}> I accept the terms and conditions.</label>",
        checked(form.accept_terms)
    );
    html.push_str("</fieldset>\n");

    html.push_str("<button type=\"submit\">Submit Data</button>\n</form>\n");
}

fn push_option(html: &mut String, label: &str, selected: bool) {
    let selected = if selected { " selected" } else { "" };
    let _ = write!(html, "<option value=\"{label}\"{selected}>{label}</option>");
}

fn checked(on: bool) -> &'static str {
    if on { " checked" } else { "" }
}

fn push_notice(html: &mut String, notice: &Notice) {
    let class = match notice.level {
        NoticeLevel::Success => "success",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Info => "info",
    };
    let _ = writeln!(
        html,
        "<div class=\"notice {class}\" role=\"status\">{}</div>",
        escape_html(&notice.message)
    );
}

fn push_table(html: &mut String, rows: &[StudentRecord]) {
    html.push_str("<h3>Registered Students</h3>\n<table>\n<thead><tr>");
    for header in TABLE_HEADERS {
        let _ = write!(html, "<th>{header}</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        let cells = [
            row.id.to_string(),
            row.first_name.clone(),
            row.last_name.clone(),
            opt_cell(&row.title),
            opt_cell(&row.age),
            opt_cell(&row.nationality),
            opt_cell(&row.registration_status),
            opt_cell(&row.num_courses),
            opt_cell(&row.num_semesters),
        ];
        for cell in cells {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
}

fn opt_cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, first: &str) -> StudentRecord {
        StudentRecord {
            id,
            first_name: first.to_string(),
            last_name: "Lopez".to_string(),
            title: Some(String::new()),
            age: Some(22),
            nationality: Some("Asia".to_string()),
            registration_status: Some("Not Registered".to_string()),
            num_courses: Some(0),
            num_semesters: None,
        }
    }

    #[test]
    fn empty_view_shows_notice_instead_of_table() {
        let view = RecordView::Empty(Notice::info("No student records found."));
        let html = render_page(None, &view, None);
        assert!(html.contains("No student records found."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn table_has_fixed_headers_and_one_row_per_record() {
        let view = RecordView::Rows(vec![record(1, "Ana"), record(2, "Ben")]);
        let html = render_page(Some(&Notice::success("ok")), &view, None);
        for header in TABLE_HEADERS {
            assert!(html.contains(&format!("<th>{header}</th>")));
        }
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<td>Not Registered</td>"));
        assert!(html.contains("notice success"));
    }

    #[test]
    fn user_text_is_escaped() {
        let view = RecordView::Rows(vec![record(1, "<script>")]);
        let html = render_page(None, &view, None);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<td><script>"));
    }

    #[test]
    fn posted_values_are_put_back_into_the_form() {
        let form = Submission {
            first_name: "Ana \"Q\"".to_string(),
            last_name: "Lopez".to_string(),
            title: Title::Dr,
            age: crate::types::form::NumberInput::Invalid(String::new()),
            nationality: Nationality::Oceania,
            registered: true,
            accept_terms: true,
            ..Submission::default()
        };
        let view = RecordView::Empty(Notice::info("No student records found."));
        let html = render_page(None, &view, Some(&form));

        assert!(html.contains(r#"name="first_name" value="Ana &quot;Q&quot;""#));
        assert!(html.contains(r#"name="last_name" value="Lopez""#));
        assert!(html.contains(r#"<option value="Dr." selected>"#));
        assert!(html.contains(r#"<option value="Oceania" selected>"#));
        assert!(html.contains(r#"name="age" min="18" max="110" step="1" value="""#));
        assert!(html.contains(r#"name="registered" value="true" checked"#));
        assert!(html.contains(r#"name="accept_terms" value="true" checked"#));
    }

    #[test]
    fn fresh_form_shows_widget_defaults() {
        let view = RecordView::Empty(Notice::info("No student records found."));
        let html = render_page(None, &view, None);
        assert!(html.contains(r#"name="age" min="18" max="110" step="1" value="18""#));
        assert!(html.contains(r#"<option value="" selected>"#));
        assert!(html.contains(r#"<option value="Africa" selected>"#));
        assert!(!html.contains(" checked"));
    }
}
