//! # Slot availability
//!
//! Free slots for a day are the catalog entries left after removing
//!
//! 1. slots that already started, when the day is today, and
//! 2. slots overlapping any booked range of that day.
//!
//! Bookings are matched to a day by the date portion of their stored UTC
//! timestamp.

use tracing::warn;

use crate::{
    catalog::SlotCatalog,
    models::booking::{AvailableSlots, Booking},
    time::{CivilDate, ClockTime, TimeRange},
};

/// Minute ranges of the bookings stored under `day`.
///
/// Bookings with unreadable clock values are skipped.
pub fn booked_ranges(bookings: &[Booking], day: CivilDate) -> Vec<TimeRange> {
    bookings
        .iter()
        .filter(|booking| booking.civil_date() == day)
        .filter_map(|booking| match booking.time_range() {
            Ok(range) => Some(range),
            Err(err) => {
                warn!(booking_id = %booking.id, error = %err, "Skipping booking with unreadable times");
                None
            }
        })
        .collect()
}

/// Labels of catalog slots that overlap none of `booked`.
///
/// With `now` set, slots starting at or before it are dropped as well.
pub fn free_slots(catalog: &SlotCatalog, booked: &[TimeRange], now: Option<ClockTime>) -> Vec<String> {
    catalog
        .slots()
        .iter()
        .filter(|slot| now.is_none_or(|now| slot.range.start > now))
        .filter(|slot| !booked.iter().any(|range| slot.range.overlaps(*range)))
        .map(|slot| slot.slot.clone())
        .collect()
}

pub fn available_slots(
    catalog: &SlotCatalog,
    bookings: &[Booking],
    today: CivilDate,
    tomorrow: CivilDate,
    now: ClockTime,
) -> AvailableSlots {
    AvailableSlots {
        today: free_slots(catalog, &booked_ranges(bookings, today), Some(now)),
        tomorrow: free_slots(catalog, &booked_ranges(bookings, tomorrow), None),
    }
}
