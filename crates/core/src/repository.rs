use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    errors::SlotResult,
    models::booking::{Booking, NewBooking, SlotKey},
};

/// Storage seam for booking records.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings whose station, connector, date and stored clock texts all
    /// equal the key.
    async fn find_by_slot(&self, key: &SlotKey) -> SlotResult<Vec<Booking>>;

    /// Bookings of one station connector with `from <= date < until`.
    async fn find_in_range(
        &self,
        station_id: &str,
        connector_id: &str,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SlotResult<Vec<Booking>>;

    /// Bookings owned by the user, newest date first, then by stored start
    /// time text descending.
    async fn find_by_user(&self, user_id: &str) -> SlotResult<Vec<Booking>>;

    /// The booking with this id, provided it belongs to the user.
    async fn find_owned(&self, id: Uuid, user_id: &str) -> SlotResult<Option<Booking>>;

    /// Stores a new booking. Implementations that enforce slot uniqueness
    /// report a clash as `SlotError::SlotUnavailable`.
    async fn create(&self, booking: NewBooking) -> SlotResult<Booking>;

    /// Persists the current start and end time of an existing booking.
    async fn save(&self, booking: &Booking) -> SlotResult<Booking>;

    async fn delete(&self, booking: &Booking) -> SlotResult<()>;
}
