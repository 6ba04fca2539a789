use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalogue_offerings::document::DocumentError;
use catalogue_storage::StorageError;
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum CatalogueServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Graph not found: {0}")]
    GraphNotFound(String),
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error("Internal server error: {0}")]
    Internal(anyhow::Error),
}

impl From<StorageError> for CatalogueServerError {
    fn from(error: StorageError) -> Self {
        Self::Internal(error.into())
    }
}

impl From<DocumentError> for CatalogueServerError {
    fn from(error: DocumentError) -> Self {
        match error {
            DocumentError::Parsing(e) => Self::BadRequest(format!("Invalid RDF payload: {e}")),
            other => Self::Internal(other.into()),
        }
    }
}

impl IntoResponse for CatalogueServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogueServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CatalogueServerError::GraphNotFound(_) => StatusCode::NOT_FOUND,
            CatalogueServerError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            CatalogueServerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            CatalogueServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &self {
            // The full prefix would duplicate what the status line already says.
            CatalogueServerError::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        };
        (
            status,
            Json(json!({ "status": "error", "message": message })),
        )
            .into_response()
    }
}
