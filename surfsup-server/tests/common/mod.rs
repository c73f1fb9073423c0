//! Shared fixtures: a seeded climate database on disk and a router over it

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;
use tower::ServiceExt;

use surfsup_server::config::ServerSection;
use surfsup_server::db::create_pool;
use surfsup_server::http::{build_router, AppState};

pub const TOBS_STATION: &str = "USC00519397";

const SCHEMA: &str = r#"
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
"#;

/// One `measurement` row: station, date, prcp, tobs
pub type Row<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

pub struct TestDb {
    _dir: TempDir,
    pub path: PathBuf,
}

/// Create a database file with the climate schema and the given rows.
pub async fn seed(measurements: &[Row<'_>], stations: &[&str]) -> TestDb {
    seed_with_schema(SCHEMA, measurements, stations).await
}

pub async fn seed_with_schema(ddl: &str, measurements: &[Row<'_>], stations: &[&str]) -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().filename(&path).create_if_missing(true))
        .await
        .unwrap();

    sqlx::raw_sql(ddl).execute(&pool).await.unwrap();

    for &(station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    for (i, &station) in stations.iter().enumerate() {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?, ?, 21.3, -157.8, ?)",
        )
        .bind(station)
        .bind(format!("Station {i}"))
        .bind(i as f64 * 10.0)
        .execute(&pool)
        .await
        .unwrap();
    }

    pool.close().await;
    TestDb { _dir: dir, path }
}

/// Build state and router over a seeded database.
pub async fn app(db: &TestDb) -> (Router, Arc<AppState>) {
    app_with(db, &ServerSection::default()).await
}

pub async fn app_with(db: &TestDb, server: &ServerSection) -> (Router, Arc<AppState>) {
    let pool = create_pool(&db.path).await.unwrap();
    let state = Arc::new(AppState::new(pool, TOBS_STATION).await.unwrap());
    let router = build_router(Arc::clone(&state), server);
    (router, state)
}

pub struct Reply {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl Reply {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn get(router: &Router, uri: &str) -> Reply {
    send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

/// GET `uri` from a browser page at `origin`; returns the allowed origin, if any.
pub async fn cors_origin(router: &Router, uri: &str, origin: &str) -> Option<String> {
    let request = Request::builder()
        .uri(uri)
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

async fn send(router: &Router, request: Request<Body>) -> Reply {
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Reply {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
