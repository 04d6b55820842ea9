//! Calendar-day source and day arithmetic.
//!
//! Every streak, goal and counter window works on local calendar days. The
//! [`Clock`] trait lets tests pin "today" and move it forward.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};

pub trait Clock {
    /// The current local calendar day.
    fn today(&self) -> NaiveDate;

    /// The current instant, for `createdAt`/`updatedAt` stamps.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a settable day. Clones share the same day, so a test can
/// keep a handle and advance it after the clock has been moved into a
/// [`Dashboard`](crate::Dashboard).
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Rc::new(Cell::new(today)),
        }
    }

    pub fn advance_days(&self, days: i64) {
        self.today.set(self.today.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now(&self) -> DateTime<Utc> {
        self.today
            .get()
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now)
    }
}

pub fn yesterday(day: NaiveDate) -> NaiveDate {
    day - Duration::days(1)
}

/// Sunday on or before `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_sunday() as i64)
}
