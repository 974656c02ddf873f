use axum::{Router, extract::DefaultBodyLimit, routing::get};

use crate::db::sqlite::StudentStore;
use crate::handlers::students::{create_student, list_students, show_form, submit_form};
use crate::service::form_workflow::FormWorkflow;

/// Form posts are a handful of short fields.
const BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone)]
pub struct RegistryState {
    pub workflow: FormWorkflow<StudentStore>,
}

impl RegistryState {
    pub fn new(store: StudentStore) -> Self {
        Self {
            workflow: FormWorkflow::new(store),
        }
    }
}

pub fn registry_router(state: RegistryState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api/students", get(list_students).post(create_student))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}
