//! Serving Sieve schemas over HTTP types.
//!
//! This crate is transport-agnostic: it consumes `http::Request<Bytes>` and
//! produces `http::Response<Bytes>`, leaving sockets to the host server.
//!
//! - [`Handler`]: async request processor receiving resolved arguments
//! - [`Endpoint`]: a schema bound to a handler; answers help and argument
//!   errors itself
//! - [`Registry`]: longest-prefix route lookup, built once at startup
//! - [`Cors`]: permissive cross-origin headers and preflight answers
//! - [`JsonResponse`], [`TextResponse`], [`ErrorResponse`]: response builders
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use http::{Request, StatusCode};
//! use sieve_core::{ParamSpec, ParamType, Schema};
//! use sieve_server::{handler_fn, Cors, Registry, TextResponse};
//!
//! let schema = Schema::builder("/square")
//!     .param(ParamSpec::new("n").of_type(ParamType::Int).required())
//!     .with_help()
//!     .compile()
//!     .unwrap();
//!
//! let registry = Registry::builder()
//!     .cors(Cors::permissive())
//!     .route(
//!         schema,
//!         handler_fn(|args, _ctx| {
//!             let n = args.integer("n");
//!             Ok(TextResponse::new((n * n).to_string()).into_response())
//!         }),
//!     )
//!     .unwrap()
//!     .build();
//!
//! let request = Request::get("/square?n=0x10").body(Bytes::new()).unwrap();
//! let response = tokio_test::block_on(registry.dispatch(request));
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(&response.body()[..], b"256");
//! ```

#![doc(html_root_url = "https://docs.rs/sieve-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cors;
mod endpoint;
mod error;
mod handler;
mod registry;
mod response;

pub use cors::{Cors, DEFAULT_ALLOW_HEADERS, DEFAULT_ALLOW_METHODS};
pub use endpoint::Endpoint;
pub use error::{HandlerError, RegistryError};
pub use handler::{handler_fn, Handler, HandlerFn, NotImplemented};
pub use registry::{Registry, RegistryBuilder};
pub use response::{ErrorResponse, JsonResponse, TextResponse};
