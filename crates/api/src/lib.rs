pub mod db;
pub mod query;
pub mod routes;
mod startup;
mod utils;

pub use db::{
    ClimateData, ClimateStore, Measurement, MeasurementQuery, SortOrder, Station, StationActivity,
};
pub use query::{
    parse_date, PrecipitationReading, QueryEngine, QueryError, TemperatureReading,
    TemperatureSummary,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
