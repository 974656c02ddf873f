use crate::db::models::{NewStudent, StudentRecord};
use crate::error::RegistryError;
use std::future::Future;

/// Storage operations the form workflow relies on.
pub trait StudentRepository: Send + Sync {
    /// True iff a record with exactly this (first, last) pair is stored.
    fn exists(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> impl Future<Output = Result<bool, RegistryError>> + Send;

    /// Append a record and return the id the store assigned to it.
    fn insert(
        &self,
        student: NewStudent,
    ) -> impl Future<Output = Result<i64, RegistryError>> + Send;

    /// Every stored record, ordered by id.
    fn list_all(&self) -> impl Future<Output = Result<Vec<StudentRecord>, RegistryError>> + Send;
}
