//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `crate::output`, `tokio`, `std::fs` or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod instance;

#[allow(unused_imports)]
pub use config::{CfConfig, NamedTarget, validate_config_key, validate_config_value};
#[allow(unused_imports)]
pub use error::{ConfigError, StartFailure};
#[allow(unused_imports)]
pub use instance::{InstanceCounts, InstanceSnapshot, PollOutcome, StartPhase, TickDecision, Verdict, classify};
