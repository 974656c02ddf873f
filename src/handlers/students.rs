use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::db::models::StudentRecord;
use crate::db::repository::StudentRepository;
use crate::render::render_page;
use crate::service::form_workflow::{Notice, Rejection, SubmissionOutcome};
use crate::types::form::Submission;
use crate::{RegistryError, router::RegistryState};

/// GET / -> entry form plus the current record table.
pub async fn show_form(State(state): State<RegistryState>) -> Result<Html<String>, RegistryError> {
    let view = state.workflow.records().await?;
    Ok(Html(render_page(None, &view, None)))
}

/// POST / -> handle one form submission, then re-read and render the table.
/// The form comes back filled with what was posted.
pub async fn submit_form(
    State(state): State<RegistryState>,
    Form(submission): Form<Submission>,
) -> Result<Html<String>, RegistryError> {
    let outcome = state.workflow.submit(submission.clone()).await?;
    let view = state.workflow.records().await?;
    Ok(Html(render_page(
        Some(&outcome.notice()),
        &view,
        Some(&submission),
    )))
}

/// GET /api/students -> all records as JSON, ordered by id.
pub async fn list_students(
    State(state): State<RegistryState>,
) -> Result<Json<Vec<StudentRecord>>, RegistryError> {
    let rows = state.workflow.repository().list_all().await?;
    Ok(Json(rows))
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub notice: Notice,
}

/// POST /api/students -> JSON variant of the form submission.
pub async fn create_student(
    State(state): State<RegistryState>,
    Json(submission): Json<Submission>,
) -> Result<Response, RegistryError> {
    let outcome = state.workflow.submit(submission).await?;
    let (status, id) = match &outcome {
        SubmissionOutcome::Registered { id, .. } => (StatusCode::CREATED, Some(*id)),
        SubmissionOutcome::Rejected(Rejection::AlreadyRegistered { .. }) => {
            (StatusCode::CONFLICT, None)
        }
        SubmissionOutcome::Rejected(_) => (StatusCode::UNPROCESSABLE_ENTITY, None),
    };
    let body = SubmissionResponse {
        id,
        notice: outcome.notice(),
    };
    Ok((status, Json(body)).into_response())
}
