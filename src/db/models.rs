use crate::types::form::RegistrationStatus;
use serde::Serialize;
use sqlx::FromRow;

/// A stored student row. Nullable columns stay optional on the way out.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, FromRow)]
pub struct StudentRecord {
    pub id: i64,
    #[sqlx(rename = "firstname")]
    pub first_name: String,
    #[sqlx(rename = "lastname")]
    pub last_name: String,
    pub title: Option<String>,
    pub age: Option<i64>,
    pub nationality: Option<String>,
    pub registration_status: Option<String>,
    pub num_courses: Option<i64>,
    pub num_semesters: Option<i64>,
}

/// A record that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub age: i64,
    pub nationality: String,
    pub registration_status: RegistrationStatus,
    pub num_courses: i64,
    pub num_semesters: i64,
}

impl NewStudent {
    /// Attach a store-assigned id, producing the row as it now exists.
    pub fn into_record(self, id: i64) -> StudentRecord {
        StudentRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            title: Some(self.title),
            age: Some(self.age),
            nationality: Some(self.nationality),
            registration_status: Some(self.registration_status.as_str().to_string()),
            num_courses: Some(self.num_courses),
            num_semesters: Some(self.num_semesters),
        }
    }
}
