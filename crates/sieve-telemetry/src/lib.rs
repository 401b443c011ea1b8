//! Logging setup for Sieve services.
//!
//! Library crates in this workspace only emit `tracing` events. Binaries
//! call [`init_logging`] once at startup to decide where those events go.
//!
//! ```rust,ignore
//! use sieve_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production().with_service_name("search-api"))?;
//! ```

#![doc(html_root_url = "https://docs.rs/sieve-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{create_env_filter, fields, init_logging, LogConfig, DEFAULT_SERVICE_NAME};
