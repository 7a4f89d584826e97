//! Logging setup for Periplus.
//!
//! Periplus components emit `tracing` events (routes skipped during
//! registration, operations documented, registry resets). This crate installs
//! a `tracing-subscriber` pipeline for them: an [`EnvFilter`] built from the
//! configured level and either JSON or pretty output.
//!
//! # Example
//!
//! ```rust,ignore
//! use periplus_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(documented = 12, "registration complete");
//! ```
//!
//! [`EnvFilter`]: tracing_subscriber::EnvFilter

#![doc(html_root_url = "https://docs.rs/periplus-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
