//! Remote error reported by the Cloud Controller.

use serde::Deserialize;
use thiserror::Error;

/// The application has not finished staging; instance queries are premature.
pub const APP_NOT_STAGED: &str = "170002";

/// Staging the application failed.
pub const APP_STAGING_ERROR: &str = "170001";

/// A classified error returned by a remote call.
///
/// `code` carries the platform's numeric error code as a string. Transport
/// failures (connection refused, TLS, unreadable body) have an empty code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct ApiError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
    #[serde(default)]
    description: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    /// An error that never reached the platform, or whose answer was unreadable.
    pub fn transport(description: impl Into<String>) -> Self {
        Self::new("", description)
    }

    /// Build an error from a non-success HTTP response.
    ///
    /// Cloud Controller error bodies look like
    /// `{"code":170002,"description":"App has not finished staging","error_code":"CF-NotStaged"}`.
    /// Anything else is reported with the status and raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => Self::new(parsed.code.to_string(), parsed.description),
            Err(_) => Self::transport(format!(
                "Server error, status code: {status}, body: {}",
                String::from_utf8_lossy(body).trim()
            )),
        }
    }

    #[must_use]
    pub fn is_not_staged(&self) -> bool {
        self.code == APP_NOT_STAGED
    }

    #[must_use]
    pub fn is_staging_error(&self) -> bool {
        self.code == APP_STAGING_ERROR
    }
}
