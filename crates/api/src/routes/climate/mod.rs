pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use precipitation::{precipitation, PrecipitationEntry};
pub use stations::{stations, StationEntry};
pub use temperature::{temperature_range, temperature_since, TemperatureStats};
pub use tobs::{tobs, TemperatureObservation};
