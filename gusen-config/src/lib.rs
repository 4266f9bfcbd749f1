//! Configuration for the admin backend.
//!
//! Values resolve in order: process environment (optionally seeded from a
//! `.env` file), then a TOML file, then built-in defaults. Guard rails run
//! after composition and either reject the config or attach warnings.

pub mod loader;
pub mod models;
pub mod sources;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{
    AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    ServerConfig,
};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};
