use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::{ops::Bound, path::Path, time::Duration};
use time::Date;

use super::{
    ClimateData, Error, Measurement, MeasurementQuery, SortOrder, Station, StationActivity,
};

/// Tables and columns the service reads, checked once at startup
const SCHEMA: &[(&str, &[&str])] = &[
    ("measurement", &["station", "date", "prcp", "tobs"]),
    ("station", &["station", "name"]),
];

/// Observation dataset stored in a SQLite file, opened read-only
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    pub async fn open(path: &str, max_connections: u32) -> Result<Self, Error> {
        if !Path::new(path).is_file() {
            return Err(Error::NotFound(path.to_owned()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let store = Self::from_pool(pool).await?;
        info!("observation database opened read-only at: {}", path);
        Ok(store)
    }

    /// Wrap an existing pool, verifying it exposes the expected tables
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, Error> {
        let store = Self { pool };
        store.verify_schema().await?;
        Ok(store)
    }

    async fn verify_schema(&self) -> Result<(), Error> {
        for &(table, columns) in SCHEMA {
            let found: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
                .bind(table)
                .fetch_all(&self.pool)
                .await?;
            if found.is_empty() {
                return Err(Error::MissingTable(table));
            }
            if let Some(column) = columns
                .iter()
                .copied()
                .find(|column| !found.iter().any(|name| name.eq_ignore_ascii_case(column)))
            {
                return Err(Error::MissingColumn { table, column });
            }
        }
        Ok(())
    }
}

/// Build the SELECT for a measurement scan along with its bind values, in order
pub fn measurement_sql(query: &MeasurementQuery) -> (String, Vec<String>) {
    let mut sql = String::from("SELECT station, date, prcp, tobs FROM measurement");
    let mut clauses = Vec::new();
    let mut values = Vec::new();

    if let Some(station_id) = &query.station_id {
        clauses.push("station = ?");
        values.push(station_id.clone());
    }

    match query.start {
        Bound::Included(start) => {
            clauses.push("date >= ?");
            values.push(start.to_string());
        }
        Bound::Excluded(start) => {
            clauses.push("date > ?");
            values.push(start.to_string());
        }
        Bound::Unbounded => {}
    }

    match query.end {
        Bound::Included(end) => {
            clauses.push("date <= ?");
            values.push(end.to_string());
        }
        Bound::Excluded(end) => {
            clauses.push("date < ?");
            values.push(end.to_string());
        }
        Bound::Unbounded => {}
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    match query.order {
        SortOrder::Natural => {}
        SortOrder::DateAscending => sql.push_str(" ORDER BY date ASC"),
        SortOrder::DateDescending => sql.push_str(" ORDER BY date DESC"),
    }

    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    (sql, values)
}

fn row_to_measurement(row: &SqliteRow) -> Result<Measurement, Error> {
    Ok(Measurement {
        station_id: row.try_get("station")?,
        date: row.try_get::<Date, _>("date")?,
        precipitation: row.try_get("prcp")?,
        temperature: row.try_get("tobs")?,
    })
}

#[async_trait]
impl ClimateData for ClimateStore {
    async fn measurements(&self, query: &MeasurementQuery) -> Result<Vec<Measurement>, Error> {
        let (sql, values) = measurement_sql(query);
        debug!("measurement scan: {} {:?}", sql, values);

        let mut statement = sqlx::query(&sql);
        for value in &values {
            statement = statement.bind(value);
        }
        let rows = statement.fetch_all(&self.pool).await?;

        rows.iter().map(row_to_measurement).collect()
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let rows = sqlx::query("SELECT station, name FROM station")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<Station, Error> {
                Ok(Station {
                    station_id: row.try_get("station")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    async fn station_activity(&self) -> Result<Vec<StationActivity>, Error> {
        let rows = sqlx::query(
            "SELECT station, COUNT(*) AS observations FROM measurement GROUP BY station",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<StationActivity, Error> {
                let observations: i64 = row.try_get("observations")?;
                Ok(StationActivity {
                    station_id: row.try_get("station")?,
                    observations: observations as usize,
                })
            })
            .collect()
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;

        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await?;
        if result != "ok" {
            return Err(Error::Integrity(result));
        }
        Ok(())
    }
}
