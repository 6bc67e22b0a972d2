use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flightdesk_core::{CoreError, ProviderError};
use serde_json::json;
use std::any::Any;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Only POST requests are allowed")]
    MethodNotAllowed,
    #[error("Invalid JSON: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Provider(ProviderError),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidInput(_) | AppError::Validation(_) | AppError::Provider(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(msg) => tracing::error!("Internal Server Error: {}", msg),
            AppError::Provider(err) => tracing::warn!(error = %err, "Provider error returned to client"),
            _ => tracing::debug!(%status, error = %self, "Request rejected"),
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::Validation(msg),
            CoreError::Provider(err) => AppError::Provider(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Turns a handler panic into a 500 carrying the panic message.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let description = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unexpected failure".to_string()
    };
    AppError::Internal(description).into_response()
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
