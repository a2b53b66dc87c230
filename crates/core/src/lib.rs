//! Climate API Core Library
//!
//! Configuration discovery and loading shared by the climate API binaries,
//! plus the service-wide defaults.

mod config;

pub use config::{find_config_file, load_config, ConfigSource};

/// Application name used for config lookup paths
pub const APP_NAME: &str = "climate-api";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5005;

/// Default location of the observation database
pub const DEFAULT_DATABASE: &str = "./Resources/hawaii.sqlite";

/// First date included in the precipitation series, unless overridden
pub const DEFAULT_PRECIPITATION_CUTOFF: &str = "2016-08-23";

/// Default size of the read-only connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
