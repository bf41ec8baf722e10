//! # Slot catalog
//!
//! Every station offers the same grid of thirteen one-hour slots between
//! 09:00 and 22:00. The catalog is built once at start-up and handed to the
//! booking service as an immutable value.

use crate::{errors::SlotResult, time::TimeRange};

pub const STANDARD_SLOT_LABELS: [&str; 13] = [
    "09:00 AM - 10:00 AM",
    "10:00 AM - 11:00 AM",
    "11:00 AM - 12:00 PM",
    "12:00 PM - 01:00 PM",
    "01:00 PM - 02:00 PM",
    "02:00 PM - 03:00 PM",
    "03:00 PM - 04:00 PM",
    "04:00 PM - 05:00 PM",
    "05:00 PM - 06:00 PM",
    "06:00 PM - 07:00 PM",
    "07:00 PM - 08:00 PM",
    "08:00 PM - 09:00 PM",
    "09:00 PM - 10:00 PM",
];

/// One catalog entry: its display label and the minutes it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub slot: String,
    pub range: TimeRange,
}

impl TimeSlot {
    pub fn parse(label: &str) -> SlotResult<Self> {
        Ok(Self {
            slot: label.to_string(),
            range: TimeRange::parse_labeled(label)?,
        })
    }

    pub fn start_time_in_minutes(&self) -> u16 {
        self.range.start.minutes()
    }

    pub fn end_time_in_minutes(&self) -> u16 {
        self.range.end.minutes()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    slots: Vec<TimeSlot>,
}

impl SlotCatalog {
    pub fn from_labels<I, S>(labels: I) -> SlotResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slots = labels
            .into_iter()
            .map(|label| TimeSlot::parse(label.as_ref()))
            .collect::<SlotResult<Vec<_>>>()?;
        Ok(Self { slots })
    }

    pub fn standard() -> SlotResult<Self> {
        Self::from_labels(STANDARD_SLOT_LABELS)
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
