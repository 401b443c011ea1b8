//! # Sieve Core
//!
//! Declarative request-argument resolution and validation.
//!
//! A route declares the parameters it expects as [`ParamSpec`]s. At startup
//! they are compiled once into an immutable [`Schema`]. For each request the
//! schema extracts raw values from cookies, body, query string and path,
//! coerces them to their declared types, applies defaults and validators,
//! and returns a [`ParsedArgs`] holding typed values and [`Diagnostic`]s.
//! The same schema renders a [`UsageDoc`] for help and error responses.
//!
//! ## Example
//!
//! ```rust
//! use sieve_core::{ParamSpec, ParamType, Schema};
//! use sieve_extract::{ExtractConfig, ExtractionContextBuilder};
//! use http::{Method, Uri};
//!
//! let schema = Schema::builder("/api/find")
//!     .purpose("find records")
//!     .param(ParamSpec::new("q").required())
//!     .param(ParamSpec::new("limit").of_type(ParamType::Int).default_value(20))
//!     .param(ParamSpec::new("exact").of_type(ParamType::Bool))
//!     .compile()
//!     .expect("schema compiles");
//!
//! let ctx = ExtractionContextBuilder::new()
//!     .method(Method::GET)
//!     .uri(Uri::from_static("/api/find?q=rust&limit=0x10&exact"))
//!     .build();
//!
//! let args = schema.parse(&ctx, &ExtractConfig::default());
//! assert!(!args.has_errors());
//! assert_eq!(args.string("q"), "rust");
//! assert_eq!(args.integer("limit"), 16);
//! assert!(args.bool("exact"));
//! ```
//!
//! ## Errors
//!
//! | When | What | Type |
//! |------|------|------|
//! | compile | bad declaration | [`SchemaError`] |
//! | parse | bad request | [`Diagnostic`] on [`ParsedArgs`] |
//! | access | wrong accessor for the declared type | [`AccessError`] or panic |

#![doc(html_root_url = "https://docs.rs/sieve-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod args;
mod coerce;
mod diagnostic;
mod error;
mod method;
mod param;
mod parse;
mod render;
mod schema;
mod value;

pub use args::ParsedArgs;
pub use coerce::{parse_bool, parse_float, parse_int};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{AccessError, SchemaError};
pub use method::MethodSet;
pub use param::{ParamSpec, Validator};
pub use render::{ArgDoc, UsageDoc};
pub use schema::{CompiledParam, Schema, SchemaBuilder, HELP_PARAM};
pub use value::{ParamType, ParamValues, Scalar};
