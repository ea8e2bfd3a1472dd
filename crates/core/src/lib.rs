//! Core utilities for Trailside
//!
//! This crate provides the application-level pieces shared by the tools:
//!
//! - **Error handling**: Errors with codes, context, recovery suggestions and exit codes
//! - **Configuration**: TOML-based configuration with defaults and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use trailside_core::config::Config;
//!
//! let config = Config::load(None).expect("valid configuration");
//! println!("radius: {} m", config.schema.filter.radius_m);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
