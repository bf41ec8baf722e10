use async_trait::async_trait;
use chrono::{DateTime, Utc};
use evslot_core::{
    errors::SlotResult,
    models::booking::{Booking, NewBooking, SlotKey},
    repository::BookingRepository,
};
use mockall::mock;
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
        async fn find_by_slot(&self, key: &SlotKey) -> SlotResult<Vec<Booking>>;

        async fn find_in_range(
            &self,
            station_id: &str,
            connector_id: &str,
            from: DateTime<Utc>,
            until: DateTime<Utc>,
        ) -> SlotResult<Vec<Booking>>;

        async fn find_by_user(&self, user_id: &str) -> SlotResult<Vec<Booking>>;

        async fn find_owned(&self, id: Uuid, user_id: &str) -> SlotResult<Option<Booking>>;

        async fn create(&self, booking: NewBooking) -> SlotResult<Booking>;

        async fn save(&self, booking: &Booking) -> SlotResult<Booking>;

        async fn delete(&self, booking: &Booking) -> SlotResult<()>;
    }
}
