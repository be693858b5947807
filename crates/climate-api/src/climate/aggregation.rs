use serde::Serialize;
use std::collections::BTreeMap;
use time::Date;
use utoipa::ToSchema;

use crate::{iso_date, DateRange, Observation};

/// Min/average/max temperature of every reading taken on one date
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct DailySummary {
    #[serde(rename = "Date", with = "iso_date")]
    pub date: Date,
    #[serde(rename = "Min Temp")]
    pub min_temp: f64,
    #[serde(rename = "Avg Temp")]
    pub avg_temp: f64,
    #[serde(rename = "Max Temp")]
    pub max_temp: f64,
}

struct TemperatureStats {
    min: f64,
    max: f64,
    sum: f64,
    count: u32,
}

impl TemperatureStats {
    fn new(reading: f64) -> Self {
        Self {
            min: reading,
            max: reading,
            sum: reading,
            count: 1,
        }
    }

    fn push(&mut self, reading: f64) {
        self.min = self.min.min(reading);
        self.max = self.max.max(reading);
        self.sum += reading;
        self.count += 1;
    }

    fn summarize(&self, date: Date) -> DailySummary {
        DailySummary {
            date,
            min_temp: self.min,
            avg_temp: round_to_tenth(self.sum / f64::from(self.count)),
            max_temp: self.max,
        }
    }
}

/// Round half away from zero to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-date temperature summaries for the observations inside `range`.
///
/// Readings without a temperature are skipped and dates left without any
/// reading are omitted. Output is ordered by date.
pub fn aggregate<'a, I>(observations: I, range: &DateRange) -> Vec<DailySummary>
where
    I: IntoIterator<Item = &'a Observation>,
{
    observations
        .into_iter()
        .filter(|observation| range.contains(observation.date))
        .filter_map(|observation| {
            observation
                .temperature
                .map(|reading| (observation.date, reading))
        })
        .fold(
            BTreeMap::<Date, TemperatureStats>::new(),
            |mut by_date, (date, reading)| {
                by_date
                    .entry(date)
                    .and_modify(|stats| stats.push(reading))
                    .or_insert_with(|| TemperatureStats::new(reading));
                by_date
            },
        )
        .into_iter()
        .map(|(date, stats)| stats.summarize(date))
        .collect()
}
