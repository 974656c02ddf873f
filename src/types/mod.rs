pub mod form;

pub use form::{Nationality, RegistrationStatus, Submission, Title};
