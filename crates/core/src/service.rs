//! # Booking service
//!
//! Business rules of the booking lifecycle, independent of HTTP and of the
//! storage engine. Each operation is a short pipeline: normalize the input,
//! query the repository, apply the rules, mutate the repository.
//!
//! Duplicate detection on create compares the exact stored range, not
//! general overlap, and updates are not re-validated at all. Both mirror the
//! established API behavior.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    availability,
    catalog::SlotCatalog,
    clock::Clock,
    errors::{SlotError, SlotResult},
    models::booking::{AvailabilityQuery, AvailabilityReport, BookSlotRequest, Booking, NewBooking},
    repository::BookingRepository,
    time::{split_range, CivilDate, ClockTime},
};

pub const MISSING_STATION_MESSAGE: &str = "Station ID and Connector ID are required.";
pub const NO_BOOKINGS_MESSAGE: &str = "No bookings found.";
pub const BOOKING_NOT_FOUND_MESSAGE: &str = "Booking not found.";
pub const BOOKING_NOT_OWNED_MESSAGE: &str = "Booking not found or does not belong to the user.";

#[derive(Clone)]
pub struct BookingService {
    repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    catalog: Arc<SlotCatalog>,
}

impl BookingService {
    pub fn new(
        repository: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        catalog: SlotCatalog,
    ) -> Self {
        Self {
            repository,
            clock,
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// Reserves a connector for a date and 24-hour time range.
    ///
    /// # Errors
    ///
    /// * `SlotError::Validation` - malformed date or clock values
    /// * `SlotError::PastSlot` - the range starts at or before the current
    ///   local time on today's local date
    /// * `SlotError::SlotUnavailable` - the identical range is already booked
    pub async fn book_slot(&self, user_id: &str, request: BookSlotRequest) -> SlotResult<Booking> {
        let date = CivilDate::parse_dmy(&request.date)?;
        let start = ClockTime::parse_24h(&request.start_time)?;
        ClockTime::parse_24h(&request.end_time)?;

        let now = self.clock.local_now();
        if date == CivilDate::from(now.date()) && start <= ClockTime::from_time(now.time()) {
            return Err(SlotError::PastSlot);
        }

        let booking = NewBooking {
            station_id: request.station_id,
            connector_id: request.connector_id,
            date,
            start_time: request.start_time,
            end_time: request.end_time,
            station_name: request.station_name,
            station_image: request.station_image,
            user_id: user_id.to_string(),
        };

        let existing = self.repository.find_by_slot(&booking.slot_key()).await?;
        if !existing.is_empty() {
            debug!(
                station_id = %booking.station_id,
                connector_id = %booking.connector_id,
                date = %booking.date,
                "Requested range is already booked"
            );
            return Err(SlotError::SlotUnavailable);
        }

        let created = self.repository.create(booking).await?;
        info!(booking_id = %created.id, user_id, "Slot booked");
        Ok(created)
    }

    /// Free catalog slots of one connector for the local today and tomorrow.
    ///
    /// Storage is queried over `[today 00:00Z, tomorrow 23:59:59.999Z)`, a
    /// window wide enough to cover both local days whatever the offset.
    pub async fn available_slots(&self, query: AvailabilityQuery) -> SlotResult<AvailabilityReport> {
        let (Some(station_id), Some(connector_id)) = (
            query.station_id.filter(|id| !id.is_empty()),
            query.connector_id.filter(|id| !id.is_empty()),
        ) else {
            return Err(SlotError::Validation(MISSING_STATION_MESSAGE.to_string()));
        };

        let local_now = self.clock.local_now();
        let today = CivilDate::from(local_now.date());
        let now = ClockTime::from_time(local_now.time());
        let tomorrow = today
            .next_day()
            .ok_or_else(|| SlotError::internal(format!("No calendar day follows {today}")))?;

        let from = today.utc_midnight();
        let until = tomorrow.utc_midnight() + Duration::milliseconds(86_399_999);
        let bookings = self
            .repository
            .find_in_range(&station_id, &connector_id, from, until)
            .await?;

        Ok(AvailabilityReport {
            today,
            tomorrow,
            slots: availability::available_slots(&self.catalog, &bookings, today, tomorrow, now),
        })
    }

    /// All bookings of the user. An empty result is reported as
    /// `SlotError::NotFound`.
    pub async fn list_bookings(&self, user_id: &str) -> SlotResult<Vec<Booking>> {
        let bookings = self.repository.find_by_user(user_id).await?;
        if bookings.is_empty() {
            return Err(SlotError::NotFound(NO_BOOKINGS_MESSAGE.to_string()));
        }
        Ok(bookings)
    }

    /// Replaces start and end time from a `"<start> - <end>"` string. The new
    /// values are stored verbatim; overlap and past-time rules are not
    /// applied again.
    pub async fn update_booking(
        &self,
        user_id: &str,
        booking_id: &str,
        range: &str,
    ) -> SlotResult<Booking> {
        let (start_time, end_time) = split_range(range)?;

        let mut booking = self
            .find_owned(booking_id, user_id)
            .await?
            .ok_or_else(|| SlotError::NotFound(BOOKING_NOT_FOUND_MESSAGE.to_string()))?;

        booking.start_time = start_time.to_string();
        booking.end_time = end_time.to_string();

        let saved = self.repository.save(&booking).await?;
        info!(booking_id = %saved.id, user_id, "Booking updated");
        Ok(saved)
    }

    pub async fn delete_booking(&self, user_id: &str, booking_id: &str) -> SlotResult<()> {
        let booking = self
            .find_owned(booking_id, user_id)
            .await?
            .ok_or_else(|| SlotError::NotFound(BOOKING_NOT_OWNED_MESSAGE.to_string()))?;

        self.repository.delete(&booking).await?;
        info!(booking_id = %booking.id, user_id, "Booking deleted");
        Ok(())
    }

    // An id that does not parse cannot name a stored booking.
    async fn find_owned(&self, booking_id: &str, user_id: &str) -> SlotResult<Option<Booking>> {
        match Uuid::parse_str(booking_id) {
            Ok(id) => self.repository.find_owned(id, user_id).await,
            Err(_) => Ok(None),
        }
    }
}
