//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p relay-api --test uploads_test`.
//! Storage is an in-memory double; scratch files go to a per-test temp dir.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use relay_api::setup::routes;
use relay_api::state::AppState;
use relay_core::Config;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

use storage::RecordingStorage;

/// Test application: server, storage double and scratch directory.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<RecordingStorage>,
    pub scratch: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of files currently left in the scratch directory.
    pub fn scratch_files(&self) -> Vec<String> {
        std::fs::read_dir(self.scratch.path())
            .expect("Failed to read scratch dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect()
    }
}

/// Builder for a [`TestApp`] with optional environment overrides.
#[derive(Default)]
pub struct TestAppBuilder {
    vars: HashMap<String, String>,
    storage_failure: Option<String>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn failing_storage(mut self, message: &str) -> Self {
        self.storage_failure = Some(message.to_string());
        self
    }

    pub fn build(self) -> TestApp {
        let scratch = tempfile::tempdir().expect("Failed to create scratch directory");

        let mut vars = self.vars;
        vars.insert(
            "SCRATCH_DIR".to_string(),
            scratch.path().to_string_lossy().to_string(),
        );
        let config =
            Config::from_lookup(|key| vars.get(key).cloned()).expect("Invalid test configuration");

        let storage = Arc::new(match self.storage_failure {
            Some(message) => RecordingStorage::failing(&message),
            None => RecordingStorage::new(),
        });

        let state = Arc::new(AppState::new(config, storage.clone()));
        let app = routes::setup_routes(state);
        let server =
            TestServer::new(app.into_make_service()).expect("Failed to create test server");

        TestApp {
            server,
            storage,
            scratch,
        }
    }
}

/// Setup test app with default configuration and a recording storage.
pub fn setup_test_app() -> TestApp {
    TestAppBuilder::new().build()
}
