//! # Date and clock normalization
//!
//! Bookings carry a calendar date plus two textual clock values. Two textual
//! formats coexist: 24-hour `"HH:MM"` written at creation time and the 12-hour
//! `"hh:MM AM"` labels of the slot catalog, which also end up in storage when a
//! booking is moved onto a catalog slot. Both are normalized here onto one
//! minutes-since-midnight scale.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{SlotError, SlotResult};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

const HALF_DAY: u16 = 12 * 60;

/// A calendar date with no time zone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the `DD-MM-YYYY` form used by booking requests.
    pub fn parse_dmy(text: &str) -> SlotResult<Self> {
        let invalid = || SlotError::Validation(format!("Invalid date '{text}', expected DD-MM-YYYY"));

        let mut parts = text.trim().split('-');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let day: u32 = day.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        Self::new(year, month, day).ok_or_else(invalid)
    }

    /// Date portion of a UTC timestamp, i.e. what an ISO-8601 rendering of the
    /// timestamp shows before the `T`.
    pub fn from_utc(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp.date_naive())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn next_day(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Midnight UTC of this date; the form bookings are stored under.
    pub fn utc_midnight(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::MIN))
    }

    /// `YYYY-MM-DD`
    pub fn iso_key(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_key())
    }
}

/// A time of day as minutes since midnight, `0..=1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Hour and minute of a wall-clock reading; seconds are dropped.
    pub fn from_time(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Parses 24-hour `HH:MM`. `24:00` is accepted as the end of the day.
    pub fn parse_24h(text: &str) -> SlotResult<Self> {
        let (hours, minutes) = split_clock(text)?;
        if hours > 24 || minutes > 59 {
            return Err(invalid_clock(text));
        }

        Self::from_minutes(hours * 60 + minutes).ok_or_else(|| invalid_clock(text))
    }

    /// Parses `hh:MM AM` / `hh:MM PM`.
    ///
    /// `12:xx AM` maps to just after midnight and `12:xx PM` to just after
    /// noon. Without a period marker the value is read as 24-hour, which lets
    /// stored 24-hour values share the catalog's scale.
    pub fn parse_labeled(text: &str) -> SlotResult<Self> {
        let mut parts = text.split_whitespace();
        let (Some(clock), period, None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid_clock(text));
        };

        let Some(period) = period else {
            return Self::parse_24h(clock);
        };

        let (hours, minutes) = split_clock(clock)?;
        if hours > 12 || minutes > 59 {
            return Err(invalid_clock(text));
        }

        let mut total = hours * 60 + minutes;
        match period.to_ascii_uppercase().as_str() {
            "PM" if hours != 12 => total += HALF_DAY,
            "AM" if hours == 12 => total -= HALF_DAY,
            "AM" | "PM" => {}
            _ => return Err(invalid_clock(text)),
        }

        Ok(Self(total))
    }

    /// Renders as `hh:MM AM`, the catalog's label form.
    pub fn to_labeled(self) -> String {
        let hours = (self.0 / 60) % 24;
        let minutes = self.0 % 60;
        let period = if hours < 12 { "AM" } else { "PM" };
        let display_hour = match hours % 12 {
            0 => 12,
            h => h,
        };
        format!("{display_hour:02}:{minutes:02} {period}")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

fn split_clock(text: &str) -> SlotResult<(u16, u16)> {
    let (hours, minutes) = text
        .trim()
        .split_once(':')
        .ok_or_else(|| invalid_clock(text))?;
    let hours = hours.parse().map_err(|_| invalid_clock(text))?;
    let minutes = minutes.parse().map_err(|_| invalid_clock(text))?;
    Ok((hours, minutes))
}

fn invalid_clock(text: &str) -> SlotError {
    SlotError::Validation(format!("Invalid time '{text}'"))
}

/// Half-open `[start, end)` span of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeRange {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Parses `"<start> - <end>"` where each side is a labeled clock value.
    pub fn parse_labeled(text: &str) -> SlotResult<Self> {
        let (start, end) = split_range(text)?;
        Ok(Self::new(
            ClockTime::parse_labeled(start)?,
            ClockTime::parse_labeled(end)?,
        ))
    }

    pub fn duration_minutes(self) -> i32 {
        i32::from(self.end.minutes()) - i32::from(self.start.minutes())
    }

    /// Ranges that merely touch at an edge do not overlap.
    pub fn overlaps(self, other: TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Splits a combined `"<start> - <end>"` string into its two sides.
///
/// Anything after a second separator is ignored.
pub fn split_range(text: &str) -> SlotResult<(&str, &str)> {
    let mut parts = text.split(" - ");
    match (parts.next(), parts.next()) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(SlotError::Validation(format!(
            "Invalid time range '{text}', expected '<start> - <end>'"
        ))),
    }
}
