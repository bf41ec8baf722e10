//! # Availability Handlers
//!
//! Public lookup of the free catalog slots of one station connector for
//! the server's local today and tomorrow.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use evslot_core::models::{booking::AvailabilityQuery, envelope::AvailabilityResponse};

use crate::{
    middleware::error_handling::{AppError, FETCH_SLOTS_FAILED_MESSAGE},
    ApiState,
};

/// Lists free slots of a connector
///
/// # Endpoint
///
/// ```text
/// GET /available?stationId=...&connectorId=...
/// ```
///
/// Slots that already started today and slots overlapping an existing
/// booking are left out.
///
/// # Errors
///
/// * `SlotError::Validation` - `stationId` or `connectorId` missing or empty
/// * `SlotError::Database` - storage failure
#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let report = state
        .bookings
        .available_slots(query)
        .await
        .map_err(|err| AppError::from(err).unexpected_message(FETCH_SLOTS_FAILED_MESSAGE))?;

    Ok(Json(AvailabilityResponse {
        success: true,
        available_slots: report.slots,
        today: report.today.iso_key(),
        tomorrow: report.tomorrow.iso_key(),
    }))
}
