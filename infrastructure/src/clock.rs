//! System clock adapter.

use chrono::NaiveDate;
use docflow_application::Clock;

/// Clock reading the local date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
