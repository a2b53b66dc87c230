mod aggregate;
mod dates;

pub use aggregate::{most_active, round_tenths, summarize, TemperatureSummary};
pub use dates::{parse_date, ISO_DATE};

use log::debug;
use std::{ops::Bound, sync::Arc};
use time::{Date, Duration};

use crate::db::{
    self, ClimateData, Measurement, MeasurementQuery, SortOrder, Station, StationActivity,
};

/// Length of the trailing temperature window, counted back from the latest observation
pub const YEAR_WINDOW_DAYS: i64 = 365;

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDateFormat(String),
    #[error("No data: {0}")]
    NoData(&'static str),
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(#[from] db::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: Date,
    pub precipitation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub date: Date,
    pub temperature: f64,
}

/// Read-only queries over the observation dataset
pub struct QueryEngine {
    store: Arc<dyn ClimateData>,
    precipitation_cutoff: Date,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn ClimateData>, precipitation_cutoff: Date) -> Self {
        Self {
            store,
            precipitation_cutoff,
        }
    }

    pub async fn health_check(&self) -> Result<(), QueryError> {
        Ok(self.store.health_check().await?)
    }

    /// Every reading on or after the cutoff, ascending by date
    pub async fn precipitation(&self) -> Result<Vec<PrecipitationReading>, QueryError> {
        let query = MeasurementQuery::all()
            .start(Bound::Included(self.precipitation_cutoff))
            .order(SortOrder::DateAscending);
        let measurements = self.store.measurements(&query).await?;
        debug!(
            "{} precipitation readings since {}",
            measurements.len(),
            self.precipitation_cutoff
        );

        Ok(measurements
            .into_iter()
            .map(|m| PrecipitationReading {
                date: m.date,
                precipitation: m.precipitation,
            })
            .collect())
    }

    pub async fn stations(&self) -> Result<Vec<Station>, QueryError> {
        Ok(self.store.stations().await?)
    }

    pub async fn most_active_station(&self) -> Result<StationActivity, QueryError> {
        let activity = self.store.station_activity().await?;
        let busiest =
            most_active(activity).ok_or(QueryError::NoData("no measurements recorded"))?;
        debug!(
            "most active station {} with {} observations",
            busiest.station_id, busiest.observations
        );

        Ok(busiest)
    }

    pub async fn latest_date(&self) -> Result<Date, QueryError> {
        let query = MeasurementQuery::all()
            .order(SortOrder::DateDescending)
            .limit(1);
        let newest = self.store.measurements(&query).await?;
        newest
            .first()
            .map(|m| m.date)
            .ok_or(QueryError::NoData("no measurements recorded"))
    }

    /// Observations of the most active station during the year before the latest reading
    pub async fn year_window_temperatures(&self) -> Result<Vec<TemperatureReading>, QueryError> {
        let latest = self.latest_date().await?;
        let cutoff = latest.saturating_sub(Duration::days(YEAR_WINDOW_DAYS));
        let station = self.most_active_station().await?;

        let query = MeasurementQuery::all()
            .station(station.station_id)
            .start(Bound::Excluded(cutoff));
        let measurements = self.store.measurements(&query).await?;

        Ok(measurements
            .into_iter()
            .map(|m| TemperatureReading {
                date: m.date,
                temperature: m.temperature,
            })
            .collect())
    }

    /// TMIN/TAVG/TMAX over `[start, end]`, or everything from `start` on when `end` is absent
    pub async fn temperature_summary(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<TemperatureSummary, QueryError> {
        let query = MeasurementQuery::all()
            .start(Bound::Included(start))
            .end(end.map_or(Bound::Unbounded, Bound::Included));
        let measurements: Vec<Measurement> = self.store.measurements(&query).await?;

        summarize(measurements.iter().map(|m| m.temperature)).ok_or(QueryError::NoData(
            "no temperature observations in the requested range",
        ))
    }
}
