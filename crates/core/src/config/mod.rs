//! Configuration loading and schema definitions
//!
//! Settings live in `trailside.toml`; command-line flags override them.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
