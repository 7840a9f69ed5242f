//! Deterministic clock for lifecycle tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to noon of a fixed local day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    /// Pins the clock to `day`, given as `YYYYMMDD`.
    ///
    /// # Panics
    ///
    /// Panics when `day` is not a valid date.
    pub fn on(day: &str) -> Self {
        let date = NaiveDate::parse_from_str(day, "%Y%m%d").expect("test dates are valid");
        let noon = date.and_hms_opt(12, 0, 0).expect("noon is a valid time");
        let local = Local
            .from_local_datetime(&noon)
            .earliest()
            .expect("noon exists in the local time zone");
        Self(local)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}
