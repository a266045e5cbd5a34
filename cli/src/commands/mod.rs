//! Command implementations

pub mod config;
pub mod start;
pub mod version;
