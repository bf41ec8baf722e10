//! Request extractors whose rejections use the response envelope.

use axum::extract::FromRequest;

use crate::middleware::error_handling::AppError;

/// `axum::Json` with rejections reported as `400` validation errors.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
