use async_trait::async_trait;
use itertools::Itertools;
use log::{info, warn};
use std::sync::Arc;

use super::{format_date, CsvSource, DateRange, Observation, SqliteSource};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Dataset not found: {0}")]
    NotFound(String),
    #[error("Failed to query sqlite dataset: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to read csv dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid observation date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("Dataset loader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Backing dataset the observation store is built from
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Human readable location of the dataset, used in logs
    fn describe(&self) -> String;
    /// Read every observation in the dataset's natural order
    async fn load(&self) -> Result<Vec<Observation>, Error>;
}

/// Pick a loader for the dataset at `path` based on its extension
pub fn open_source(path: &str) -> Arc<dyn ObservationSource> {
    match climate_api_core::file_extension(path).as_deref() {
        Some("csv") => Arc::new(CsvSource::new(path)),
        _ => Arc::new(SqliteSource::new(path)),
    }
}

pub(crate) fn parse_observation_date(value: &str) -> Result<time::Date, Error> {
    super::parse_date(value).map_err(|source| Error::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Immutable, in-memory copy of the dataset
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Default)]
pub struct ObservationStore {
    observations: Vec<Observation>,
}

impl ObservationStore {
    pub async fn load(source: &dyn ObservationSource) -> Result<Self, Error> {
        info!("Loading observations from {}", source.describe());
        let store = Self::from_observations(source.load().await?);

        if store.is_empty() {
            warn!("Dataset {} contains no observations", source.describe());
        } else {
            let (first, last) = store
                .all()
                .iter()
                .map(|o| o.date)
                .minmax()
                .into_option()
                .map(|(first, last)| (format_date(first), format_date(last)))
                .unwrap_or_default();
            info!(
                "Loaded {} observations across {} stations ({} to {})",
                store.len(),
                store.all().iter().map(|o| &o.station_id).unique().count(),
                first,
                last
            );
        }

        Ok(store)
    }

    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Every observation, in load order
    pub fn all(&self) -> &[Observation] {
        &self.observations
    }

    /// Observations whose date falls inside `range`, in load order
    pub fn by_date_range<'a>(
        &'a self,
        range: &'a DateRange,
    ) -> impl Iterator<Item = &'a Observation> + 'a {
        self.observations
            .iter()
            .filter(move |observation| range.contains(observation.date))
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
