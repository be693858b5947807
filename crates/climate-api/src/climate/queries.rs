use itertools::Itertools;
use log::debug;
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};
use time::Date;
use utoipa::{IntoParams, ToSchema};

use super::{aggregate, DailySummary, DateWindow, StationActivity, WindowResolver};
use crate::{format_date, iso_date, parse_date, DateRange, ObservationStore};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("No Data Found")]
    NoData,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Precipitation keyed by date; later observations overwrite earlier ones
#[derive(Clone, Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct PrecipitationSeries(pub BTreeMap<String, Option<f64>>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct StationEntry {
    #[serde(rename = "Station")]
    pub station: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct TemperatureReading {
    #[serde(rename = "Date", with = "iso_date")]
    pub date: Date,
    #[serde(rename = "Temp")]
    pub temp: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemperatureParams {
    /// First date to summarize (YYYY-MM-DD), required
    pub start: Option<String>,
    /// Last date to summarize (YYYY-MM-DD), open-ended when omitted
    pub end: Option<String>,
}

impl TemperatureParams {
    pub fn starting_at(start: &str) -> Self {
        Self {
            start: Some(start.to_string()),
            end: None,
        }
    }

    pub fn between(start: &str, end: &str) -> Self {
        Self {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    /// Builds the parameters from raw query pairs, keeping the first value
    /// of a repeated key
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |mut params, (key, value)| {
                match key.as_str() {
                    "start" => {
                        params.start.get_or_insert(value);
                    }
                    "end" => {
                        params.end.get_or_insert(value);
                    }
                    _ => {}
                }
                params
            })
    }

    fn date_range(&self) -> Result<DateRange, QueryError> {
        let start = self
            .start
            .as_deref()
            .ok_or_else(|| QueryError::InvalidRequest(String::from("start date is required")))?;
        let start = parse_param("start", start)?;

        match self.end.as_deref() {
            Some(end) => Ok(DateRange::between(start, parse_param("end", end)?)),
            None => Ok(DateRange::starting_at(start)),
        }
    }
}

fn parse_param(name: &str, value: &str) -> Result<Date, QueryError> {
    parse_date(value).map_err(|e| {
        QueryError::InvalidRequest(format!(
            "{} is not a YYYY-MM-DD date ({}): {}",
            name, value, e
        ))
    })
}

/// Entry point for every read the API serves
///
/// Station counts and the latest date are derived once when the facade is
/// built; the store itself is never mutated afterwards.
pub struct ClimateQueries {
    store: Arc<ObservationStore>,
    activity: StationActivity,
    window: WindowResolver,
    tobs_window_days: u32,
}

impl ClimateQueries {
    pub fn new(store: Arc<ObservationStore>, tobs_window_days: u32) -> Self {
        let activity = StationActivity::from_store(&store);
        let window = WindowResolver::from_store(&store);
        Self {
            store,
            activity,
            window,
            tobs_window_days,
        }
    }

    pub fn most_active_station(&self) -> Result<&str, QueryError> {
        self.activity.most_active_station()
    }

    pub fn latest_date(&self) -> Result<Date, QueryError> {
        self.window.latest_date()
    }

    pub fn trailing_window(&self) -> Result<DateWindow, QueryError> {
        self.window.trailing_window(self.tobs_window_days)
    }

    pub fn precipitation(&self) -> Result<PrecipitationSeries, QueryError> {
        if self.store.is_empty() {
            return Err(QueryError::NoData);
        }

        let series = self
            .store
            .all()
            .iter()
            .map(|observation| (format_date(observation.date), observation.precipitation))
            .collect();
        Ok(PrecipitationSeries(series))
    }

    /// Distinct station ids in the order they first appear
    pub fn stations(&self) -> Result<Vec<StationEntry>, QueryError> {
        let stations: Vec<StationEntry> = self
            .store
            .all()
            .iter()
            .map(|observation| observation.station_id.as_str())
            .unique()
            .map(|station| StationEntry {
                station: station.to_string(),
            })
            .collect();

        if stations.is_empty() {
            return Err(QueryError::NoData);
        }
        Ok(stations)
    }

    /// Temperatures of the most active station over the trailing window
    pub fn most_active_temperatures(&self) -> Result<Vec<TemperatureReading>, QueryError> {
        let station = self.most_active_station()?;
        let window = self.trailing_window()?;
        let range = DateRange::from(window);
        debug!(
            "most active station {} between {} and {}",
            station,
            format_date(window.start),
            format_date(window.end)
        );

        let readings: Vec<TemperatureReading> = self
            .store
            .by_date_range(&range)
            .filter(|observation| observation.station_id == station)
            .map(|observation| TemperatureReading {
                date: observation.date,
                temp: observation.temperature,
            })
            .sorted_by_key(|reading| reading.date)
            .collect();

        if readings.is_empty() {
            return Err(QueryError::NoData);
        }
        Ok(readings)
    }

    pub fn temperature_summary(
        &self,
        params: &TemperatureParams,
    ) -> Result<Vec<DailySummary>, QueryError> {
        let range = params.date_range()?;
        let summaries = aggregate(self.store.all(), &range);

        if summaries.is_empty() {
            return Err(QueryError::NoData);
        }
        Ok(summaries)
    }
}
