//! # Error Handling Middleware
//!
//! Maps `SlotError` onto HTTP status codes and the response envelope
//! `{ "success": false, "message": ... }`.
//!
//! Unexpected failures (storage faults, internal errors) are logged and
//! answered with a per-operation message; the raw error text travels along
//! in an `error` field for diagnostics.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use evslot_core::errors::SlotError;
use serde_json::json;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";
pub const FETCH_SLOTS_FAILED_MESSAGE: &str = "An error occurred while fetching booking slot.";
pub const FETCH_BOOKINGS_FAILED_MESSAGE: &str = "An error occurred while fetching booking details.";
pub const UPDATE_FAILED_MESSAGE: &str = "An error occurred while updating the booking.";
pub const DELETE_FAILED_MESSAGE: &str = "An error occurred while deleting the booking.";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use evslot_api::middleware::error_handling::AppError;
/// use evslot_core::errors::SlotError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(SlotError::NotFound("Booking not found.".to_string()).into());
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError {
    pub error: SlotError,
    unexpected_message: &'static str,
}

impl AppError {
    pub fn new(error: SlotError) -> Self {
        Self {
            error,
            unexpected_message: UNEXPECTED_ERROR_MESSAGE,
        }
    }

    /// Replaces the generic message sent for unexpected failures.
    pub fn unexpected_message(mut self, message: &'static str) -> Self {
        self.unexpected_message = message;
        self
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            SlotError::Validation(_) | SlotError::PastSlot | SlotError::SlotUnavailable => {
                StatusCode::BAD_REQUEST
            }
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SlotError::Database(_) | SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = if self.error.is_unexpected() {
            tracing::error!(error = %self.error, "Request failed unexpectedly");
            json!({
                "success": false,
                "message": self.unexpected_message,
                "error": self.error.to_string(),
            })
        } else {
            json!({ "success": false, "message": self.error.to_string() })
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `SlotResult` inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError::new(err)
    }
}

/// Wraps stray `eyre::Report`s as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError::new(SlotError::Database(err))
    }
}

/// Malformed or incomplete JSON bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::new(SlotError::Validation(rejection.body_text()))
    }
}

/// Maps a SlotError to an HTTP response
pub fn map_error(err: SlotError) -> Response {
    AppError::new(err).into_response()
}
