//! In-memory booking storage for development and testing

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use evslot_core::{
    errors::{SlotError, SlotResult},
    models::booking::{Booking, NewBooking, SlotKey},
    repository::BookingRepository,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Keeps bookings in a map guarded by one lock, so the exact-range
/// uniqueness check and the insert happen atomically.
#[derive(Debug, Default)]
pub struct MemoryBookingRepository {
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully formed record, bypassing all checks.
    pub async fn insert(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }

    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }

    pub async fn get(&self, id: Uuid) -> Option<Booking> {
        self.bookings.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn find_by_slot(&self, key: &SlotKey) -> SlotResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.values().filter(|b| key.matches(b)).cloned().collect())
    }

    async fn find_in_range(
        &self,
        station_id: &str,
        connector_id: &str,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SlotResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.station_id == station_id && b.connector_id == connector_id)
            .filter(|b| b.date >= from && b.date < until)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: &str) -> SlotResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut owned: Vec<Booking> = bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.start_time.cmp(&a.start_time))
        });
        Ok(owned)
    }

    async fn find_owned(&self, id: Uuid, user_id: &str) -> SlotResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).filter(|b| b.user_id == user_id).cloned())
    }

    async fn create(&self, booking: NewBooking) -> SlotResult<Booking> {
        let key = booking.slot_key();
        let mut bookings = self.bookings.write().await;
        if bookings.values().any(|b| key.matches(b)) {
            return Err(SlotError::SlotUnavailable);
        }

        let booking = booking.into_booking(Uuid::new_v4());
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn save(&self, booking: &Booking) -> SlotResult<Booking> {
        let mut bookings = self.bookings.write().await;
        let key = booking.slot_key();
        if bookings
            .values()
            .any(|other| other.id != booking.id && key.matches(other))
        {
            return Err(SlotError::SlotUnavailable);
        }

        let stored = bookings
            .get_mut(&booking.id)
            .ok_or_else(|| SlotError::NotFound(format!("Booking with ID {} not found", booking.id)))?;
        stored.start_time = booking.start_time.clone();
        stored.end_time = booking.end_time.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, booking: &Booking) -> SlotResult<()> {
        self.bookings.write().await.remove(&booking.id);
        Ok(())
    }
}
