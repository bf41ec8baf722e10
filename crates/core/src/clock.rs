use chrono::{Local, NaiveDateTime};

/// Source of the server's local wall-clock time.
///
/// "Today" and "now" in booking rules mean the process-local calendar, while
/// stored booking dates are UTC midnights. Take one reading per operation so
/// the date and the time of day agree.
pub trait Clock: Send + Sync {
    fn local_now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn local_now(&self) -> NaiveDateTime {
        self.0
    }
}
