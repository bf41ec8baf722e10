//! Response bodies. Every response carries `success` and usually a
//! human-readable `message` next to its payload.

use serde::{Deserialize, Serialize};

use super::booking::{AvailableSlots, Booking};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotResponse {
    pub success: bool,
    pub message: String,
    pub slot: Booking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub success: bool,
    pub available_slots: AvailableSlots,
    /// `YYYY-MM-DD` of the local "today".
    pub today: String,
    pub tomorrow: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub success: bool,
    pub message: String,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingResponse {
    pub success: bool,
    pub message: String,
    pub booking: Booking,
}
