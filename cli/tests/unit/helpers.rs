//! Shared fakes for the application services: a scripted Cloud Controller,
//! an in-memory staging log and a reporter that records every line.

#![allow(dead_code, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use bytes::Bytes;
use cf_common::{
    APP_NOT_STAGED, APP_STAGING_ERROR, ApiError, AppState, Application, ApplicationInstance,
    InstanceState,
};
use cf_cli::application::ports::{
    ApplicationRepository, LogStream, StagingLogRepository, StartReporter,
};
use futures_util::stream;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn stopped_app(instances: u32, urls: &[&str]) -> Application {
    Application {
        guid: "my-app-guid".to_string(),
        name: "my-app".to_string(),
        instances,
        urls: urls.iter().map(|u| (*u).to_string()).collect(),
        state: AppState::Stopped,
    }
}

pub fn instances(states: &[InstanceState]) -> Vec<ApplicationInstance> {
    states
        .iter()
        .cloned()
        .map(ApplicationInstance::new)
        .collect()
}

pub fn not_staged() -> ApiError {
    ApiError::new(APP_NOT_STAGED, "App has not finished staging")
}

pub fn staging_error() -> ApiError {
    ApiError::new(APP_STAGING_ERROR, "Staging error: buildpack compile failed")
}

// ── Fake: scripted Cloud Controller ──────────────────────────────────────────

type Fetch = Result<Vec<ApplicationInstance>, ApiError>;

/// Replays a fixed sequence of instance fetches. Once the script runs out
/// the last response is repeated forever.
pub struct ScriptedApps {
    start_result: Result<Option<String>, ApiError>,
    script: Mutex<VecDeque<Fetch>>,
    last: Mutex<Option<Fetch>>,
    start_calls: Mutex<u32>,
    instance_calls: Mutex<u32>,
}

impl ScriptedApps {
    pub fn new(script: Vec<Fetch>) -> Self {
        Self {
            start_result: Ok(Some("https://logs.example.com/staging".to_string())),
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            start_calls: Mutex::new(0),
            instance_calls: Mutex::new(0),
        }
    }

    pub fn with_start_result(mut self, result: Result<Option<String>, ApiError>) -> Self {
        self.start_result = result;
        self
    }

    pub fn start_count(&self) -> u32 {
        *self.start_calls.lock().expect("lock")
    }

    pub fn instance_count(&self) -> u32 {
        *self.instance_calls.lock().expect("lock")
    }
}

impl ApplicationRepository for ScriptedApps {
    async fn find_by_name(&self, name: &str) -> Result<Application, ApiError> {
        Err(ApiError::new("100004", format!("App {name} not found")))
    }

    async fn start(&self, _: &Application) -> Result<Option<String>, ApiError> {
        *self.start_calls.lock().expect("lock") += 1;
        self.start_result.clone()
    }

    async fn instances(&self, _: &Application) -> Result<Vec<ApplicationInstance>, ApiError> {
        *self.instance_calls.lock().expect("lock") += 1;
        let next = self.script.lock().expect("lock").pop_front();
        let mut last = self.last.lock().expect("lock");
        if let Some(fetch) = next {
            *last = Some(fetch);
        }
        last.clone().expect("script must not be empty")
    }
}

/// Accepts the start request, then never answers an instance fetch.
#[derive(Default)]
pub struct UnansweredPolls {
    instance_calls: Mutex<u32>,
}

impl UnansweredPolls {
    pub fn instance_count(&self) -> u32 {
        *self.instance_calls.lock().expect("lock")
    }
}

impl ApplicationRepository for UnansweredPolls {
    async fn find_by_name(&self, name: &str) -> Result<Application, ApiError> {
        Err(ApiError::new("100004", format!("App {name} not found")))
    }

    async fn start(&self, _: &Application) -> Result<Option<String>, ApiError> {
        Ok(None)
    }

    async fn instances(&self, _: &Application) -> Result<Vec<ApplicationInstance>, ApiError> {
        *self.instance_calls.lock().expect("lock") += 1;
        std::future::pending().await
    }
}

// ── Fake: staging log ────────────────────────────────────────────────────────

/// Serves the same chunks for every log URL, or fails to open.
pub struct FakeLogs {
    chunks: Option<Vec<&'static str>>,
    opened: Mutex<Vec<String>>,
}

impl FakeLogs {
    pub fn with_chunks(chunks: &[&'static str]) -> Self {
        Self {
            chunks: Some(chunks.to_vec()),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            chunks: None,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("lock").clone()
    }
}

impl StagingLogRepository for FakeLogs {
    async fn stream_log(&self, log_url: &str) -> Result<LogStream, ApiError> {
        self.opened.lock().expect("lock").push(log_url.to_string());
        match &self.chunks {
            Some(chunks) => {
                let items: Vec<Result<Bytes, ApiError>> = chunks
                    .iter()
                    .map(|c| Ok(Bytes::from_static(c.as_bytes())))
                    .collect();
                Ok(Box::pin(stream::iter(items)))
            }
            None => Err(ApiError::transport("connection refused")),
        }
    }
}

/// A log endpoint that accepts the request and never answers it.
pub struct UnansweredLog;

impl StagingLogRepository for UnansweredLog {
    async fn stream_log(&self, _: &str) -> Result<LogStream, ApiError> {
        std::future::pending().await
    }
}

// ── Fake: recording reporter ─────────────────────────────────────────────────

/// Records every transcript line. Log chunks are kept as lossy UTF-8.
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lock").clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    /// Lines that report instance counts.
    pub fn status_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.contains("instances running"))
            .collect()
    }

    fn push(&self, line: String) {
        self.lines.lock().expect("lock").push(line);
    }
}

impl StartReporter for RecordingReporter {
    fn say(&self, message: &str) {
        self.push(message.to_string());
    }

    fn ok(&self) {
        self.push("OK".to_string());
    }

    fn failed(&self, reason: &str) {
        self.push("FAILED".to_string());
        self.push(reason.to_string());
    }

    fn log(&self, chunk: &[u8]) {
        self.push(String::from_utf8_lossy(chunk).into_owned());
    }
}
