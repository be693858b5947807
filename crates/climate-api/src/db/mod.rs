mod csv_file;
mod observation;
mod sqlite;
mod store;

pub use csv_file::CsvSource;
pub use observation::{format_date, iso_date, parse_date, DateRange, Observation, DATE_FORMAT};
pub use sqlite::SqliteSource;
pub use store::{open_source, Error, ObservationSource, ObservationStore};
