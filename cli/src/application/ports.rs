//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared `cf_common`
//! types, never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::pin::Pin;

use anyhow::Result;
use bytes::Bytes;
use cf_common::{ApiError, Application, ApplicationInstance};
use futures_util::Stream;

use crate::domain::config::CfConfig;

// ── Remote Collaborator Ports ─────────────────────────────────────────────────

/// Application lookups and lifecycle calls against the Cloud Controller.
///
/// Errors are returned as [`ApiError`] so callers can classify them by code.
#[allow(async_fn_in_trait)]
pub trait ApplicationRepository {
    /// Find an application by name in the targeted space.
    async fn find_by_name(&self, name: &str) -> Result<Application, ApiError>;
    /// Request the application to start.
    ///
    /// Returns the staging log URL when the platform provides one.
    async fn start(&self, app: &Application) -> Result<Option<String>, ApiError>;
    /// Fetch the current state of every instance, ordered by index.
    async fn instances(&self, app: &Application) -> Result<Vec<ApplicationInstance>, ApiError>;
}

/// Byte stream of a remote log. Chunks are not aligned to lines.
pub type LogStream = Pin<Box<dyn Stream<Item = Result<Bytes, ApiError>> + Send>>;

/// Opens the staging log published for a starting application.
#[allow(async_fn_in_trait)]
pub trait StagingLogRepository {
    /// Open a readable stream for `log_url`.
    async fn stream_log(&self, log_url: &str) -> Result<LogStream, ApiError>;
}

// ── Output Port ───────────────────────────────────────────────────────────────

/// Abstracts the user-visible transcript of `cf start`.
///
/// Shared between the poll loop and the staging log task, so implementations
/// must be safe to call from several tasks at once. Sync trait, no async.
pub trait StartReporter: Send + Sync {
    /// Print one line.
    fn say(&self, message: &str);
    /// Print the `OK` confirmation.
    fn ok(&self);
    /// Print `FAILED` followed by `reason`.
    fn failed(&self, reason: &str);
    /// Copy raw staging log bytes to the transcript.
    fn log(&self, chunk: &[u8]);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration, returning defaults if none has been saved.
    fn load(&self) -> Result<CfConfig>;
    /// Persist the given configuration.
    fn save(&self, config: &CfConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
