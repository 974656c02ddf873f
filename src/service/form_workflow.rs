use crate::db::models::{NewStudent, StudentRecord};
use crate::db::repository::StudentRepository;
use crate::error::RegistryError;
use crate::types::form::{MAX_AGE, MIN_AGE, NumberInput, RegistrationStatus, Submission};
use serde::Serialize;
use tracing::{debug, info};

pub const NO_RECORDS_MESSAGE: &str = "No student records found.";

/// Column headers of the record table, in display order.
pub const TABLE_HEADERS: [&str; 9] = [
    "ID",
    "First Name",
    "Last Name",
    "Title",
    "Age",
    "Nationality",
    "Registration Status",
    "Courses",
    "Semesters",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Info,
}

/// Inline feedback shown above the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Why a submission was turned away. None of these touch storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    TermsNotAccepted,
    MissingName,
    /// Age was blank, not a whole number, or outside the accepted range.
    InvalidAge(String),
    InvalidCount {
        field: &'static str,
        raw: String,
    },
    AlreadyRegistered {
        first_name: String,
        last_name: String,
    },
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::TermsNotAccepted => "You must accept the terms and conditions.".to_string(),
            Rejection::MissingName => "First Name and Last Name are required.".to_string(),
            Rejection::InvalidAge(_) => {
                format!("Age must be a whole number between {MIN_AGE} and {MAX_AGE}.")
            }
            Rejection::InvalidCount { field, .. } => {
                format!("{field} must be a whole number of 0 or more.")
            }
            Rejection::AlreadyRegistered {
                first_name,
                last_name,
            } => format!("Student {first_name} {last_name} is already registered!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Registered {
        id: i64,
        first_name: String,
        last_name: String,
    },
    Rejected(Rejection),
}

impl SubmissionOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            SubmissionOutcome::Registered {
                first_name,
                last_name,
                ..
            } => Notice::success(format!(
                "Student {first_name} {last_name} has been successfully added!"
            )),
            SubmissionOutcome::Rejected(reason) => Notice::warning(reason.message()),
        }
    }
}

/// What the table area shows: the rows, or a notice when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordView {
    Rows(Vec<StudentRecord>),
    Empty(Notice),
}

/// Accept/reject decision for one submission, plus the read path for the table.
#[derive(Clone)]
pub struct FormWorkflow<R> {
    repo: R,
}

impl<R: StudentRepository> FormWorkflow<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Checks run in order and the first failure ends the submission.
    pub async fn submit(&self, submission: Submission) -> Result<SubmissionOutcome, RegistryError> {
        let student = match Self::validate(submission) {
            Ok(student) => student,
            Err(reason) => {
                debug!(reason = ?reason, "submission rejected");
                return Ok(SubmissionOutcome::Rejected(reason));
            }
        };

        if self
            .repo
            .exists(&student.first_name, &student.last_name)
            .await?
        {
            debug!(
                first_name = %student.first_name,
                last_name = %student.last_name,
                "duplicate submission rejected"
            );
            return Ok(SubmissionOutcome::Rejected(Rejection::AlreadyRegistered {
                first_name: student.first_name,
                last_name: student.last_name,
            }));
        }

        let first_name = student.first_name.clone();
        let last_name = student.last_name.clone();
        match self.repo.insert(student).await {
            Ok(id) => {
                info!(id, first_name = %first_name, last_name = %last_name, "student registered");
                Ok(SubmissionOutcome::Registered {
                    id,
                    first_name,
                    last_name,
                })
            }
            // Another writer stored the same pair between the check and the insert.
            Err(RegistryError::Duplicate {
                first_name,
                last_name,
            }) => Ok(SubmissionOutcome::Rejected(Rejection::AlreadyRegistered {
                first_name,
                last_name,
            })),
            Err(e) => Err(e),
        }
    }

    /// Field checks that need no storage access; on success, the row to insert.
    fn validate(submission: Submission) -> Result<NewStudent, Rejection> {
        if !submission.accept_terms {
            return Err(Rejection::TermsNotAccepted);
        }
        if submission.first_name.is_empty() || submission.last_name.is_empty() {
            return Err(Rejection::MissingName);
        }
        let age = match submission.age.value() {
            Some(age) if (MIN_AGE..=MAX_AGE).contains(age) => *age,
            _ => return Err(Rejection::InvalidAge(submission.age.raw())),
        };
        let num_courses = Self::count(&submission.num_courses, "Number of Completed Courses")?;
        let num_semesters = Self::count(&submission.num_semesters, "Number of Semesters")?;

        Ok(NewStudent {
            first_name: submission.first_name,
            last_name: submission.last_name,
            title: submission.title.as_str().to_string(),
            age,
            nationality: submission.nationality.as_str().to_string(),
            registration_status: RegistrationStatus::from(submission.registered),
            num_courses,
            num_semesters,
        })
    }

    fn count(input: &NumberInput<u32>, field: &'static str) -> Result<i64, Rejection> {
        input
            .value()
            .map(|n| i64::from(*n))
            .ok_or_else(|| Rejection::InvalidCount {
                field,
                raw: input.raw(),
            })
    }

    pub async fn records(&self) -> Result<RecordView, RegistryError> {
        let rows = self.repo.list_all().await?;
        if rows.is_empty() {
            Ok(RecordView::Empty(Notice::info(NO_RECORDS_MESSAGE)))
        } else {
            Ok(RecordView::Rows(rows))
        }
    }
}
