//! Unit tests for task lifecycle management.


use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to noon of a fixed local day.
#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Local>);

impl FixedClock {
    fn on(day: &str) -> Self {
        let noon = ymd(day).and_hms_opt(12, 0, 0).expect("noon is a valid time");
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

/// Parses a `YYYYMMDD` literal used in test tables.
fn ymd(day: &str) -> NaiveDate {
    NaiveDate::parse_from_str(day, "%Y%m%d").expect("test dates are valid")
}
