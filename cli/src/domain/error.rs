//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use cf_common::ApiError;
use thiserror::Error;

// ── Start errors ──────────────────────────────────────────────────────────────

/// Terminal failures of `cf start`.
///
/// The `Display` text is the reason printed under `FAILED`. None of these
/// are retried; the user has to run `cf start` again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartFailure {
    /// The platform rejected the start request itself.
    #[error("Error starting application {app}: {detail}")]
    StartRequest { app: String, detail: ApiError },

    /// Staging reported error code 170001.
    #[error("Error staging app")]
    Staging(ApiError),

    /// Instance polling failed with any other remote error.
    #[error("{0}")]
    Remote(ApiError),

    /// At least one instance was reported as flapping.
    #[error("Start unsuccessful")]
    Flapping,

    /// The start timeout elapsed before every instance was running.
    #[error("Start app timeout")]
    Timeout,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("No space targeted. Add space.name and space.guid to the cf config file")]
    NoSpaceTargeted,
}
