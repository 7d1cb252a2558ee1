//! Small helpers shared by the workspace binaries: environment lookups,
//! TOML configuration loading and tracing setup.

pub mod config;
pub mod env;
pub mod logging;
