pub mod error;
pub mod resources;
pub mod types;

pub use error::{APP_NOT_STAGED, APP_STAGING_ERROR, ApiError};
pub use types::*;
