//! Typed configuration for Sieve.
//!
//! A [`SieveConfig`] holds three sections:
//!
//! - `extract`: body size and multipart limits ([`ExtractConfig`])
//! - `logging`: output level and format ([`LoggingSection`])
//! - `routes`: route declarations compiled into schemas at startup
//!   ([`RouteConfig`])
//!
//! Unknown fields are rejected in every section.
//!
//! # Configuration File Format
//!
//! ```toml
//! [extract]
//! max_body_size = 1048576
//! max_multipart_size = 10485760
//! max_multipart_fields = 100
//!
//! [logging]
//! level = "info"
//! format = "json"
//! include_location = false
//!
//! [[routes]]
//! route = "/api/find"
//! purpose = "find records"
//! help = true
//!
//! [[routes.params]]
//! name = "q"
//! required = true
//! memo = "search text"
//!
//! [[routes.params]]
//! name = "limit"
//! type = "int"
//! default = 20
//! ```
//!
//! # Environment Overrides
//!
//! With [`ConfigLoader::with_env_prefix`], variables such as
//! `SIEVE__EXTRACT__MAX_BODY_SIZE=65536` or `SIEVE__LOGGING__LEVEL=debug`
//! override file values.

#![doc(html_root_url = "https://docs.rs/sieve-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod sections;

pub use config::SieveConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use sections::{LogFormat, LoggingSection, RouteConfig};
pub use sieve_extract::ExtractConfig;
