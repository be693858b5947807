use async_trait::async_trait;
use climate_api_core::is_file;
use log::debug;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::str::FromStr;

use super::{store::parse_observation_date, Error, Observation, ObservationSource};

/// Only the projection the API needs is read from the `measurement` table.
const MEASUREMENT_QUERY: &str = "SELECT station, date, CAST(prcp AS REAL) AS prcp, \
     CAST(tobs AS REAL) AS tobs FROM measurement ORDER BY rowid";

/// Reads observations out of a SQLite climate database
pub struct SqliteSource {
    path: String,
}

impl SqliteSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

fn observation_from_row(row: &SqliteRow) -> Result<Observation, Error> {
    let date: String = row.try_get("date")?;
    Ok(Observation {
        station_id: row.try_get("station")?,
        date: parse_observation_date(&date)?,
        precipitation: row.try_get("prcp")?,
        temperature: row.try_get("tobs")?,
    })
}

#[async_trait]
impl ObservationSource for SqliteSource {
    fn describe(&self) -> String {
        format!("sqlite:{}", self.path)
    }

    async fn load(&self) -> Result<Vec<Observation>, Error> {
        if !is_file(&self.path) {
            return Err(Error::NotFound(self.path.clone()));
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite:{}", self.path))?.read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let rows = sqlx::query(MEASUREMENT_QUERY).fetch_all(&pool).await;
        pool.close().await;
        let rows = rows?;
        debug!("read {} measurement rows from {}", rows.len(), self.path);

        rows.iter().map(observation_from_row).collect()
    }
}
