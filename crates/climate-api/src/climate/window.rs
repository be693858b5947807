use time::{Date, Duration};

use super::QueryError;
use crate::{DateRange, ObservationStore};

/// Closed date interval `[start, end]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Date,
    pub end: Date,
}

impl From<DateWindow> for DateRange {
    fn from(window: DateWindow) -> Self {
        DateRange::between(window.start, window.end)
    }
}

/// Resolves windows relative to the newest date in the dataset
#[derive(Debug, Default)]
pub struct WindowResolver {
    latest: Option<Date>,
}

impl WindowResolver {
    pub fn from_store(store: &ObservationStore) -> Self {
        Self {
            latest: store.all().iter().map(|observation| observation.date).max(),
        }
    }

    pub fn latest_date(&self) -> Result<Date, QueryError> {
        self.latest.ok_or(QueryError::NoData)
    }

    /// The `days`-long window ending on the latest date.
    ///
    /// `days` is a plain day count, so 365 is not adjusted for leap years.
    pub fn trailing_window(&self, days: u32) -> Result<DateWindow, QueryError> {
        let end = self.latest_date()?;
        let start = end.saturating_sub(Duration::days(i64::from(days)));
        Ok(DateWindow { start, end })
    }
}
