use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evslot_core::models::{
    booking::{BookSlotRequest, UpdateBookingRequest},
    envelope::{BookSlotResponse, BookingListResponse, MessageResponse, UpdateBookingResponse},
};

use crate::{
    extract::AppJson,
    middleware::{
        auth::AuthenticatedUser,
        error_handling::{
            AppError, DELETE_FAILED_MESSAGE, FETCH_BOOKINGS_FAILED_MESSAGE, UPDATE_FAILED_MESSAGE,
        },
    },
    ApiState,
};

#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<ApiState>>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<BookSlotRequest>,
) -> Result<(StatusCode, Json<BookSlotResponse>), AppError> {
    let slot = state.bookings.book_slot(&user.user_id, payload).await?;

    let response = BookSlotResponse {
        success: true,
        message: "Slot booked successfully".to_string(),
        slot,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_all_bookings(
    State(state): State<Arc<ApiState>>,
    user: AuthenticatedUser,
) -> Result<Json<BookingListResponse>, AppError> {
    let bookings = state
        .bookings
        .list_bookings(&user.user_id)
        .await
        .map_err(|err| AppError::from(err).unexpected_message(FETCH_BOOKINGS_FAILED_MESSAGE))?;

    Ok(Json(BookingListResponse {
        success: true,
        message: "Booking details retrieved successfully.".to_string(),
        bookings,
    }))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<ApiState>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateBookingRequest>,
) -> Result<Json<UpdateBookingResponse>, AppError> {
    let booking = state
        .bookings
        .update_booking(&user.user_id, &id, &payload.start_time)
        .await
        .map_err(|err| AppError::from(err).unexpected_message(UPDATE_FAILED_MESSAGE))?;

    Ok(Json(UpdateBookingResponse {
        success: true,
        message: "Booking updated successfully.".to_string(),
        booking,
    }))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .bookings
        .delete_booking(&user.user_id, &id)
        .await
        .map_err(|err| AppError::from(err).unexpected_message(DELETE_FAILED_MESSAGE))?;

    Ok(Json(MessageResponse::ok("Booking deleted successfully.")))
}
