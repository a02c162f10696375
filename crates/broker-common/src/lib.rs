//! Shared building blocks for identity broker providers
//!
//! - [`logging`]: `tracing` subscriber setup honoring `-v/-q`, `RUST_LOG` and a per-binary default
//! - [`config`]: layered figment loading (defaults, TOML file, environment)

pub mod config;
pub mod logging;

pub use config::{ConfigLoader, ConfigurationError};
