mod sqlite;

pub use sqlite::*;

use async_trait::async_trait;
use std::ops::Bound;
use time::Date;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Database file not found: {0}")]
    NotFound(String),
    #[error("Missing table `{0}` in observation database")]
    MissingTable(&'static str),
    #[error("Missing column `{column}` on table `{table}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("Integrity check failed: {0}")]
    Integrity(String),
}

/// One daily observation row
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station_id: String,
    pub date: Date,
    /// Inches; absent when the station did not report
    pub precipitation: Option<f64>,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub station_id: String,
    pub name: String,
}

/// Number of observation rows recorded by one station
#[derive(Debug, Clone, PartialEq)]
pub struct StationActivity {
    pub station_id: String,
    pub observations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Whatever order the store enumerates rows in
    #[default]
    Natural,
    DateAscending,
    DateDescending,
}

/// Predicate and ordering for a measurement scan
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementQuery {
    pub station_id: Option<String>,
    pub start: Bound<Date>,
    pub end: Bound<Date>,
    pub order: SortOrder,
    pub limit: Option<u32>,
}

impl Default for MeasurementQuery {
    fn default() -> Self {
        Self {
            station_id: None,
            start: Bound::Unbounded,
            end: Bound::Unbounded,
            order: SortOrder::Natural,
            limit: None,
        }
    }
}

impl MeasurementQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn station(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }

    pub fn start(mut self, start: Bound<Date>) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: Bound<Date>) -> Self {
        self.end = end;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read-only access to the observation dataset
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClimateData: Send + Sync {
    async fn measurements(&self, query: &MeasurementQuery) -> Result<Vec<Measurement>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    /// Observation count per station, in no particular order
    async fn station_activity(&self) -> Result<Vec<StationActivity>, Error>;
    /// Verify the store can still be read
    async fn health_check(&self) -> Result<(), Error>;
}

