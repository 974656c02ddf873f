use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 110;

/// Honorific offered by the title select. The empty option is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Title {
    #[default]
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "Mr.")]
    Mr,
    #[serde(rename = "Ms.")]
    Ms,
    #[serde(rename = "Dr.")]
    Dr,
}

impl Title {
    pub const ALL: [Title; 4] = [Title::Empty, Title::Mr, Title::Ms, Title::Dr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Empty => "",
            Title::Mr => "Mr.",
            Title::Ms => "Ms.",
            Title::Dr => "Dr.",
        }
    }
}

/// Continent-level nationality categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nationality {
    #[default]
    Africa,
    Antarctica,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    Oceania,
    #[serde(rename = "South America")]
    SouthAmerica,
}

impl Nationality {
    pub const ALL: [Nationality; 7] = [
        Nationality::Africa,
        Nationality::Antarctica,
        Nationality::Asia,
        Nationality::Europe,
        Nationality::NorthAmerica,
        Nationality::Oceania,
        Nationality::SouthAmerica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nationality::Africa => "Africa",
            Nationality::Antarctica => "Antarctica",
            Nationality::Asia => "Asia",
            Nationality::Europe => "Europe",
            Nationality::NorthAmerica => "North America",
            Nationality::Oceania => "Oceania",
            Nationality::SouthAmerica => "South America",
        }
    }
}

/// Stored form of the "Currently Registered" toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Registered,
    #[serde(rename = "Not Registered")]
    NotRegistered,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "Registered",
            RegistrationStatus::NotRegistered => "Not Registered",
        }
    }
}

impl From<bool> for RegistrationStatus {
    fn from(registered: bool) -> Self {
        if registered {
            RegistrationStatus::Registered
        } else {
            RegistrationStatus::NotRegistered
        }
    }
}

/// A numeric form field as the user typed it.
///
/// Browsers post number inputs as text, and a cleared input arrives as an empty
/// string. Anything that does not parse as `T` is kept verbatim in `Invalid` so the
/// workflow can answer with a notice instead of failing the whole request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberInput<T> {
    Value(T),
    Invalid(String),
}

impl<T> NumberInput<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            NumberInput::Value(v) => Some(v),
            NumberInput::Invalid(_) => None,
        }
    }
}

impl<T: fmt::Display> NumberInput<T> {
    /// Text to put back into the input when the form is redisplayed.
    pub fn raw(&self) -> String {
        match self {
            NumberInput::Value(v) => v.to_string(),
            NumberInput::Invalid(s) => s.clone(),
        }
    }
}

impl<T> From<T> for NumberInput<T> {
    fn from(value: T) -> Self {
        NumberInput::Value(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber<T> {
    Number(T),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl<'de, T> Deserialize<'de> for NumberInput<T>
where
    T: Deserialize<'de> + FromStr,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawNumber::<T>::deserialize(deserializer)? {
            RawNumber::Number(v) => NumberInput::Value(v),
            RawNumber::Signed(n) => NumberInput::Invalid(n.to_string()),
            RawNumber::Float(f) => NumberInput::Invalid(f.to_string()),
            RawNumber::Text(s) => match s.trim().parse::<T>() {
                Ok(v) => NumberInput::Value(v),
                Err(_) => NumberInput::Invalid(s),
            },
        })
    }
}

/// One submission of the entry form.
///
/// Unchecked checkboxes are simply absent from an urlencoded body, so every field
/// falls back to what the form widget shows before the user touches it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub first_name: String,
    pub last_name: String,
    pub title: Title,
    pub age: NumberInput<i64>,
    pub nationality: Nationality,
    pub registered: bool,
    pub num_courses: NumberInput<u32>,
    pub num_semesters: NumberInput<u32>,
    pub accept_terms: bool,
}

impl Default for Submission {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            title: Title::default(),
            age: MIN_AGE.into(),
            nationality: Nationality::default(),
            registered: false,
            num_courses: 0.into(),
            num_semesters: 0.into(),
            accept_terms: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_labels_match_their_wire_names() {
        for title in Title::ALL {
            let json = serde_json::to_string(&title).unwrap();
            assert_eq!(json, format!("\"{}\"", title.as_str()));
        }
        for nationality in Nationality::ALL {
            let json = serde_json::to_string(&nationality).unwrap();
            assert_eq!(json, format!("\"{}\"", nationality.as_str()));
        }
    }

    #[test]
    fn missing_fields_take_widget_defaults() {
        let s: Submission = serde_json::from_str(r#"{"first_name":"Ana"}"#).unwrap();
        assert_eq!(s.first_name, "Ana");
        assert_eq!(s.age, NumberInput::Value(MIN_AGE));
        assert_eq!(s.title, Title::Empty);
        assert_eq!(s.nationality, Nationality::Africa);
        assert!(!s.accept_terms);
        assert!(!s.registered);
    }

    #[test]
    fn registration_toggle_maps_to_status() {
        assert_eq!(RegistrationStatus::from(true).as_str(), "Registered");
        assert_eq!(RegistrationStatus::from(false).as_str(), "Not Registered");
    }

    #[test]
    fn blank_and_garbled_numbers_are_kept_as_invalid() {
        let s: Submission = serde_json::from_str(
            r#"{"age":"","num_courses":"abc","num_semesters":-2}"#,
        )
        .unwrap();
        assert_eq!(s.age, NumberInput::Invalid(String::new()));
        assert_eq!(s.num_courses, NumberInput::Invalid("abc".to_string()));
        assert_eq!(s.num_semesters, NumberInput::Invalid("-2".to_string()));
    }

    #[test]
    fn numeric_text_and_numbers_both_parse() {
        let s: Submission =
            serde_json::from_str(r#"{"age":" 30 ","num_courses":4,"num_semesters":"2"}"#).unwrap();
        assert_eq!(s.age, NumberInput::Value(30));
        assert_eq!(s.num_courses, NumberInput::Value(4));
        assert_eq!(s.num_semesters, NumberInput::Value(2));
        assert_eq!(s.age.raw(), "30");
    }
}
