use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Student {first_name} {last_name} is already registered")]
    Duplicate {
        first_name: String,
        last_name: String,
    },

    #[error("Config error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for RegistryError {
    fn from(e: figment::Error) -> Self {
        RegistryError::Config(Box::new(e))
    }
}

impl IntoResponse for RegistryError {
    /// User-input problems, a lost duplicate race included, never reach this point:
    /// the form workflow turns them into notices. Whatever arrives here is a fault.
    fn into_response(self) -> axum::response::Response {
        error!(error = %self, "request failed");
        let body = ApiErrorBody {
            code: "INTERNAL_ERROR".to_string(),
            message: "An internal server error occurred.".to_string(),
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse { error: body }),
        )
            .into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn faults_map_to_internal_error_body() {
        let resp = RegistryError::Database(SqlxError::RowNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    }
}
