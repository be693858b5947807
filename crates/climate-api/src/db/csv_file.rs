use async_trait::async_trait;
use climate_api_core::is_file;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;

use super::{store::parse_observation_date, Error, Observation, ObservationSource};

/// Row layout of a `measurement` table exported to CSV
#[derive(Debug, Deserialize)]
struct MeasurementRecord {
    station: String,
    date: String,
    prcp: Option<f64>,
    tobs: Option<f64>,
}

impl TryFrom<MeasurementRecord> for Observation {
    type Error = Error;

    fn try_from(record: MeasurementRecord) -> Result<Self, Self::Error> {
        Ok(Observation {
            date: parse_observation_date(&record.date)?,
            station_id: record.station,
            precipitation: record.prcp,
            temperature: record.tobs,
        })
    }
}

/// Reads observations from a CSV export with a `station,date,prcp,tobs` header
pub struct CsvSource {
    path: String,
}

impl CsvSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

fn read_measurements(path: &str) -> Result<Vec<Observation>, Error> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;

    let observations = reader
        .deserialize::<MeasurementRecord>()
        .map(|record| Observation::try_from(record?))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("read {} measurement rows from {}", observations.len(), path);

    Ok(observations)
}

#[async_trait]
impl ObservationSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.path)
    }

    async fn load(&self) -> Result<Vec<Observation>, Error> {
        if !is_file(&self.path) {
            return Err(Error::NotFound(self.path.clone()));
        }

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_measurements(&path)).await?
    }
}
