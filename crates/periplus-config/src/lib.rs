//! Typed configuration for Periplus.
//!
//! Supports:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! The root type is [`PeriplusConfig`]:
//!
//! - [`OpenApiRegistryConfig`] - Document metadata, mount path, UI options
//! - [`LoggingConfig`] - Log level and format
//!
//! # Example
//!
//! ```no_run
//! use periplus_config::{ConfigLoader, PeriplusConfig};
//!
//! # fn main() -> Result<(), periplus_config::ConfigError> {
//! let config: PeriplusConfig = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("periplus.toml")?
//!     .with_env_prefix("PERIPLUS")
//!     .load()?;
//!
//! println!("Docs at {}", config.docs.path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [docs]
//! enabled = true
//! path = "/api/docs"
//! title = "Inventory API"
//! version = "2.0.0"
//! swagger_json_path = "/json"
//!
//! [docs.license]
//! name = "Apache-2.0"
//!
//! [[docs.servers]]
//! url = "https://inventory.example.com"
//! description = "Production"
//!
//! [docs.swagger_ui]
//! explorer = true
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Variables use the format `PREFIX__SECTION__KEY`:
//!
//! - `PERIPLUS__DOCS__ENABLED=false`
//! - `PERIPLUS__DOCS__PATH=/reference`
//! - `PERIPLUS__DOCS__TITLE=Inventory API`
//! - `PERIPLUS__DOCS__VERSION=2.0.0`
//! - `PERIPLUS__DOCS__DESCRIPTION=...`
//! - `PERIPLUS__DOCS__SWAGGER_JSON_PATH=/json`
//! - `PERIPLUS__LOGGING__ENABLED=true`
//! - `PERIPLUS__LOGGING__LEVEL=debug`
//! - `PERIPLUS__LOGGING__FORMAT=pretty`

#![doc(html_root_url = "https://docs.rs/periplus-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{PeriplusConfig, PeriplusConfigBuilder};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    ContactConfig, LicenseConfig, LogFormat, LoggingConfig, OpenApiRegistryConfig, ServerEntry,
    SwaggerUiOptions,
};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
