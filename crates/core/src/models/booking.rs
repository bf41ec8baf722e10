use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::SlotResult,
    time::{CivilDate, ClockTime, TimeRange},
};

/// A persisted reservation of one connector for one date and time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub station_id: String,
    pub connector_id: String,
    /// Midnight UTC of the booked civil date.
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub station_name: String,
    pub station_image: String,
    pub user_id: String,
}

impl Booking {
    pub fn civil_date(&self) -> CivilDate {
        CivilDate::from_utc(self.date)
    }

    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            station_id: self.station_id.clone(),
            connector_id: self.connector_id.clone(),
            date: self.civil_date(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }

    /// Minute range of the stored clock values, which may be either 24-hour
    /// or labeled 12-hour text.
    pub fn time_range(&self) -> SlotResult<TimeRange> {
        Ok(TimeRange::new(
            ClockTime::parse_labeled(&self.start_time)?,
            ClockTime::parse_labeled(&self.end_time)?,
        ))
    }
}

/// Fields of a booking that has passed validation but is not stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub station_id: String,
    pub connector_id: String,
    pub date: CivilDate,
    pub start_time: String,
    pub end_time: String,
    pub station_name: String,
    pub station_image: String,
    pub user_id: String,
}

impl NewBooking {
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            station_id: self.station_id.clone(),
            connector_id: self.connector_id.clone(),
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }

    pub fn into_booking(self, id: Uuid) -> Booking {
        Booking {
            id,
            station_id: self.station_id,
            connector_id: self.connector_id,
            date: self.date.utc_midnight(),
            start_time: self.start_time,
            end_time: self.end_time,
            station_name: self.station_name,
            station_image: self.station_image,
            user_id: self.user_id,
        }
    }
}

/// Exact identity of a booked range: clock values are compared as stored
/// text, not as minutes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub station_id: String,
    pub connector_id: String,
    pub date: CivilDate,
    pub start_time: String,
    pub end_time: String,
}

impl SlotKey {
    pub fn matches(&self, booking: &Booking) -> bool {
        booking.station_id == self.station_id
            && booking.connector_id == self.connector_id
            && booking.date == self.date.utc_midnight()
            && booking.start_time == self.start_time
            && booking.end_time == self.end_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotRequest {
    pub connector_id: String,
    /// `DD-MM-YYYY`
    pub date: String,
    /// 24-hour `HH:MM`
    pub start_time: String,
    pub end_time: String,
    pub station_id: String,
    pub station_name: String,
    pub station_image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub station_id: Option<String>,
    pub connector_id: Option<String>,
}

/// Body of the update call. Despite the name, `start_time` carries the whole
/// range as `"<start> - <end>"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub start_time: String,
}

/// Remaining catalog labels per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlots {
    pub today: Vec<String>,
    pub tomorrow: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub today: CivilDate,
    pub tomorrow: CivilDate,
    pub slots: AvailableSlots,
}
