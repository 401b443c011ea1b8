//! # Sieve
//!
//! **Declarative request-argument resolution and validation for HTTP services**
//!
//! - **One declaration per route**: name, type, default, required flag,
//!   position, method restriction and memo for every parameter
//! - **Every source merged**: cookies, body (JSON, url-encoded, multipart),
//!   query string and path, with a fixed precedence
//! - **Typed results**: integers in decimal, hex or octal, floats, Go-style
//!   booleans and bare flags
//! - **Self-documenting**: the same declaration renders the help and error
//!   documents
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sieve::prelude::*;
//!
//! let config = ConfigLoader::new().with_file("sieve.toml")?.with_env_prefix("SIEVE").load()?;
//! init_logging(&config.logging.to_log_config())?;
//!
//! let registry = sieve::declare_routes(&config)?
//!     .handler("/api/find", handler_fn(|args, _ctx| {
//!         Ok(TextResponse::new(args.string("q")).into_response())
//!     }))?
//!     .build();
//!
//! // For each request:
//! let response = registry.dispatch(request).await;
//! ```
//!
//! ## Precedence
//!
//! ```text
//! path key=value  <  cookie  <  body  <  query string
//! ```

#![doc(html_root_url = "https://docs.rs/sieve/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error;

// Schemas, coercion, results and rendering
pub use sieve_core as core;

// Raw value extraction
pub use sieve_extract as extract;

// Handlers, endpoints and the registry
pub use sieve_server as server;

// Configuration files
pub use sieve_config as config;

// Logging setup
pub use sieve_telemetry as telemetry;

/// Error raised while turning configuration into a registry.
#[derive(Debug, Error)]
pub enum Error {
    /// A route declaration is invalid.
    #[error(transparent)]
    Config(#[from] sieve_config::ConfigError),

    /// Two routes collide.
    #[error(transparent)]
    Registry(#[from] sieve_server::RegistryError),
}

/// Compiles every configured route and declares it on a registry builder.
///
/// Each route starts with a handler answering `501`; attach real handlers
/// with [`RegistryBuilder::handler`](sieve_server::RegistryBuilder::handler).
/// The builder uses the configured extraction limits.
///
/// # Errors
///
/// Returns an error if a route fails to compile or two routes collide.
pub fn declare_routes(
    config: &sieve_config::SieveConfig,
) -> Result<sieve_server::RegistryBuilder, Error> {
    let mut builder = sieve_server::Registry::builder().extract_config(config.extract.clone());
    for schema in config.compile_routes()? {
        builder = builder.declare(schema)?;
    }
    tracing::debug!(routes = config.routes.len(), "declared configured routes");
    Ok(builder)
}

/// Prelude module for convenient imports.
///
/// ```rust
/// use sieve::prelude::*;
///
/// let schema = Schema::compile("/ping", Vec::<ParamSpec>::new()).unwrap();
/// assert_eq!(schema.usage(), "/ping");
/// ```
pub mod prelude {
    pub use sieve_core::{
        AccessError, Diagnostic, DiagnosticKind, MethodSet, ParamSpec, ParamType, ParamValues,
        ParsedArgs, Scalar, Schema, SchemaBuilder, SchemaError, UsageDoc, Validator,
    };

    pub use sieve_extract::{ExtractConfig, ExtractionContext, ExtractionError};

    pub use sieve_server::{
        handler_fn, Cors, Endpoint, ErrorResponse, Handler, HandlerError, JsonResponse,
        NotImplemented, Registry, RegistryBuilder, TextResponse,
    };

    pub use sieve_config::{ConfigError, ConfigLoader, RouteConfig, SieveConfig};

    pub use sieve_telemetry::{init_logging, LogConfig};
}
