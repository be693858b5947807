pub mod climate;
pub mod db;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use climate::{
    aggregate, round_to_tenth, ClimateQueries, DailySummary, DateWindow, PrecipitationSeries,
    QueryError, StationActivity, StationEntry, TemperatureParams, TemperatureReading,
    WindowResolver,
};
pub use db::{
    format_date, iso_date, open_source, parse_date, CsvSource, DateRange, Error, Observation,
    ObservationSource, ObservationStore, SqliteSource, DATE_FORMAT,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
