//! The handler contract.
//!
//! A handler receives arguments that have already been resolved and
//! validated against the endpoint's schema, together with the raw request.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use http::Response;
//! use sieve_core::ParsedArgs;
//! use sieve_extract::ExtractionContext;
//! use sieve_server::{Handler, HandlerError, TextResponse};
//!
//! struct Greet;
//!
//! #[async_trait]
//! impl Handler for Greet {
//!     async fn handle(
//!         &self,
//!         args: &ParsedArgs,
//!         _ctx: &ExtractionContext,
//!     ) -> Result<Response<Bytes>, HandlerError> {
//!         Ok(TextResponse::new(format!("hello {}", args.string("name"))).into_response())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::Response;
use sieve_core::ParsedArgs;
use sieve_extract::ExtractionContext;

use crate::{ErrorResponse, HandlerError};

/// Request processor bound to an [`Endpoint`](crate::Endpoint).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handles a request whose arguments resolved without diagnostics.
    async fn handle(
        &self,
        args: &ParsedArgs,
        ctx: &ExtractionContext,
    ) -> Result<Response<Bytes>, HandlerError>;
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn handle(
        &self,
        args: &ParsedArgs,
        ctx: &ExtractionContext,
    ) -> Result<Response<Bytes>, HandlerError> {
        (**self).handle(args, ctx).await
    }
}

/// Handler for endpoints declared without an implementation.
///
/// Always answers `501 Not Implemented`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotImplemented;

#[async_trait]
impl Handler for NotImplemented {
    async fn handle(
        &self,
        _args: &ParsedArgs,
        _ctx: &ExtractionContext,
    ) -> Result<Response<Bytes>, HandlerError> {
        Ok(ErrorResponse::not_implemented().into_response())
    }
}

/// Adapts a synchronous closure into a [`Handler`].
///
/// ```rust
/// use sieve_server::{handler_fn, TextResponse};
///
/// let ping = handler_fn(|_args, _ctx| Ok(TextResponse::new("pong").into_response()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HandlerFn<F>(F);

/// Wraps `f` as a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&ParsedArgs, &ExtractionContext) -> Result<Response<Bytes>, HandlerError> + Send + Sync,
{
    HandlerFn(f)
}

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: Fn(&ParsedArgs, &ExtractionContext) -> Result<Response<Bytes>, HandlerError> + Send + Sync,
{
    async fn handle(
        &self,
        args: &ParsedArgs,
        ctx: &ExtractionContext,
    ) -> Result<Response<Bytes>, HandlerError> {
        (self.0)(args, ctx)
    }
}
