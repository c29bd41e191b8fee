//! Shared test harness for E2E integration tests.
//!
//! Serves a real temporary log directory through the full router, so every
//! request exercises path confinement, the file-backed tail reader, and the
//! HTTP error mapping together.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use lt_api::config::ApiConfig;
use lt_api::routes::build_router;
use lt_api::state::AppState;
use lt_core::mock::pet_sample;

/// End-to-end harness: a temp log directory behind an Axum router.
pub struct TestHarness {
    /// Directory served as the log base directory.
    pub log_dir: TempDir,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
}

impl TestHarness {
    /// Create a harness whose log directory holds `test-log.txt` (the pet sample).
    pub fn with_sample_data() -> Self {
        let h = Self::with_config(|_| {});
        h.write_log("test-log.txt", &pet_sample());
        h
    }

    /// Create a harness with an empty log directory and tweaked config.
    pub fn with_config(tweak: impl FnOnce(&mut ApiConfig)) -> Self {
        let log_dir = TempDir::new().unwrap();
        let mut config = ApiConfig {
            log_dir: log_dir.path().to_path_buf(),
            ..ApiConfig::default()
        };
        tweak(&mut config);
        let router = build_router(AppState::from_config(&config));
        Self { log_dir, router }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.log_dir.path().join(name)
    }

    /// Write `content` to `name` inside the log directory.
    pub fn write_log(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Issue a GET and return (status, raw body).
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    /// GET /log with the given query string, returning (status, JSON).
    pub async fn query_log(&self, query: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(&format!("/log?{query}")).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

/// Extract `results` from a /log response as owned strings.
pub fn results(json: &serde_json::Value) -> Vec<String> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}
