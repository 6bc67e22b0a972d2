use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections reported as `{"error": "Invalid JSON: ..."}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
