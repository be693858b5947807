mod aggregation;
mod queries;
mod station_activity;
mod window;

pub use aggregation::{aggregate, round_to_tenth, DailySummary};
pub use queries::{
    ClimateQueries, PrecipitationSeries, QueryError, StationEntry, TemperatureParams,
    TemperatureReading,
};
pub use station_activity::StationActivity;
pub use window::{DateWindow, WindowResolver};
