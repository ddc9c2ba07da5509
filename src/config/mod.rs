//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HostConfig (validated, immutable)
//!     → shared with subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The telemetry connection string may come from the environment, but
//!   resolution happens once, at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, ConfigError, DEFAULT_CONFIG_PATH};
pub use schema::{
    AccumulatorConfig, DownstreamConfig, HostConfig, ListenerConfig, TelemetryConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
