use chrono::{DateTime, Utc};
use evslot_core::models::booking::Booking;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub station_id: String,
    pub connector_id: String,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub station_name: String,
    pub station_image: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbBooking> for Booking {
    fn from(row: DbBooking) -> Self {
        Booking {
            id: row.id,
            station_id: row.station_id,
            connector_id: row.connector_id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            station_name: row.station_name,
            station_image: row.station_image,
            user_id: row.user_id,
        }
    }
}
