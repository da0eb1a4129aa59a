use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use paste_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::InvalidId(_)) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Ambiguous { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Store(StoreError::InvalidId(e)) => format!("Invalid paste id: {e}"),
            Self::Store(StoreError::NotFound(_)) => "Paste not found".to_string(),
            Self::Store(e @ StoreError::Ambiguous { .. }) => e.to_string(),
            _ => {
                tracing::error!(error = %self, "request failed");
                "Error processing request".to_string()
            }
        };
        (status, body).into_response()
    }
}
