use serde::Serializer;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

/// Calendar dates are exchanged as `YYYY-MM-DD` everywhere
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// One daily climate record for a single station
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub station_id: String,
    pub date: Date,
    pub precipitation: Option<f64>,
    pub temperature: Option<f64>,
}

impl Observation {
    pub fn new(
        station_id: impl Into<String>,
        date: Date,
        precipitation: Option<f64>,
        temperature: Option<f64>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            date,
            precipitation,
            temperature,
        }
    }
}

/// Inclusive date filter with an optional upper bound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn starting_at(start: Date) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }
}

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value.trim(), DATE_FORMAT)
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// serde adapter for `YYYY-MM-DD` dates
pub mod iso_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }
}
