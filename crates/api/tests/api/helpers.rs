use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate_api::{
    app, app_state, db::Error, ClimateData, ClimateStore, Measurement, MeasurementQuery, Station,
    StationActivity,
};
use hyper::{header, Method};
use mockall::mock;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use time::macros::date;
use tower::ServiceExt;

mock! {
    pub ClimateAccess {}
    #[async_trait]
    impl ClimateData for ClimateAccess {
        async fn measurements(&self, query: &MeasurementQuery) -> Result<Vec<Measurement>, Error>;
        async fn stations(&self) -> Result<Vec<Station>, Error>;
        async fn station_activity(&self) -> Result<Vec<StationActivity>, Error>;
        async fn health_check(&self) -> Result<(), Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let value = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("response to {} was not json ({}): {}", uri, e, body));
        (status, value)
    }
}

pub async fn spawn_app(store: Arc<dyn ClimateData>) -> TestApp {
    let state = app_state(store, date!(2016 - 08 - 23));
    TestApp { app: app(state) }
}

/// One `measurement` row: station, date, prcp, tobs
pub type Row<'a> = (&'a str, &'a str, Option<f64>, f64);

/// In-memory database laid out like the reference hawaii.sqlite
pub async fn seeded_store(stations: &[(&str, &str)], rows: &[Row<'_>]) -> Arc<dyn ClimateData> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(
        "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT,
                               latitude FLOAT, longitude FLOAT, elevation FLOAT);
         CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT,
                                   prcp FLOAT, tobs FLOAT);",
    )
    .execute(&pool)
    .await
    .unwrap();

    for &(station, name) in stations {
        sqlx::query("INSERT INTO station (station, name) VALUES (?, ?)")
            .bind(station)
            .bind(name)
            .execute(&pool)
            .await
            .unwrap();
    }

    for &(station, date, prcp, tobs) in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    Arc::new(ClimateStore::from_pool(pool).await.unwrap())
}
