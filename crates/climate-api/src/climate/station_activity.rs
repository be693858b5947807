use itertools::Itertools;
use std::collections::BTreeMap;

use super::QueryError;
use crate::ObservationStore;

/// Observation counts per station, derived once from the store
#[derive(Debug, Default)]
pub struct StationActivity {
    counts: BTreeMap<String, usize>,
}

impl StationActivity {
    pub fn from_store(store: &ObservationStore) -> Self {
        let counts = store
            .all()
            .iter()
            .map(|observation| observation.station_id.as_str())
            .counts()
            .into_iter()
            .map(|(station_id, count)| (station_id.to_string(), count))
            .collect();

        Self { counts }
    }

    pub fn observation_count(&self, station_id: &str) -> usize {
        self.counts.get(station_id).copied().unwrap_or_default()
    }

    /// Station with the most observations; ties go to the smallest station id
    pub fn most_active_station(&self) -> Result<&str, QueryError> {
        // `max_by_key` keeps the last maximum, so walk ids in descending order
        self.counts
            .iter()
            .rev()
            .max_by_key(|(_, count)| **count)
            .map(|(station_id, _)| station_id.as_str())
            .ok_or(QueryError::NoData)
    }
}
