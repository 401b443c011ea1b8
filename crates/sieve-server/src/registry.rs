//! Route registry.
//!
//! The registry is built once at startup and is read-only afterwards, so it
//! can be shared across request tasks behind an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use sieve_core::{ParamSpec, Schema};
//! use sieve_server::{handler_fn, Registry, TextResponse};
//!
//! let registry = Registry::builder()
//!     .route(
//!         Schema::compile("/ping", Vec::<ParamSpec>::new()).unwrap(),
//!         handler_fn(|_args, _ctx| Ok(TextResponse::new("pong").into_response())),
//!     )
//!     .unwrap()
//!     .build();
//!
//! assert!(registry.lookup("/ping/extra").is_some());
//! assert!(registry.lookup("/pingpong").is_none());
//! ```

use std::sync::Arc;

use bytes::Bytes;
use http::{Request, Response};
use sieve_core::Schema;
use sieve_extract::{route_suffix, ExtractConfig, ExtractionContext};
use tracing::Instrument;

use crate::{Cors, Endpoint, ErrorResponse, Handler, RegistryError};

/// Builder for a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    endpoints: Vec<Endpoint>,
    config: ExtractConfig,
    cors: Option<Cors>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the extraction limits used by routes added after this call.
    #[must_use]
    pub fn extract_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds CORS headers to every response and answers preflight requests.
    #[must_use]
    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = Some(cors);
        self
    }

    /// Registers `handler` for `schema`'s route.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRoute`] if the route is taken.
    pub fn route(
        self,
        schema: impl Into<Arc<Schema>>,
        handler: impl Handler + 'static,
    ) -> Result<Self, RegistryError> {
        let endpoint = Endpoint::new(schema, handler).with_config(self.config.clone());
        self.endpoint(endpoint)
    }

    /// Declares `schema`'s route with a handler answering `501`.
    ///
    /// Attach the real handler later with [`handler`](Self::handler).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRoute`] if the route is taken.
    pub fn declare(self, schema: impl Into<Arc<Schema>>) -> Result<Self, RegistryError> {
        let endpoint = Endpoint::unimplemented(schema).with_config(self.config.clone());
        self.endpoint(endpoint)
    }

    /// Registers a prepared endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRoute`] if the route is taken.
    pub fn endpoint(mut self, endpoint: Endpoint) -> Result<Self, RegistryError> {
        if self.position(endpoint.route()).is_some() {
            return Err(RegistryError::DuplicateRoute(endpoint.route().to_string()));
        }
        tracing::debug!(route = endpoint.route(), "registered route");
        self.endpoints.push(endpoint);
        Ok(self)
    }

    /// Replaces the handler of a declared route.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownRoute`] if nothing is declared there.
    pub fn handler(
        mut self,
        route: &str,
        handler: impl Handler + 'static,
    ) -> Result<Self, RegistryError> {
        let index = self
            .position(sieve_extract::canonical_route(route))
            .ok_or_else(|| RegistryError::UnknownRoute(route.to_string()))?;
        let endpoint = self.endpoints.swap_remove(index);
        self.endpoints.push(endpoint.with_handler(Arc::new(handler)));
        Ok(self)
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(mut self) -> Registry {
        // Longest route first, so the first match is the most specific.
        self.endpoints.sort_by(|a, b| {
            b.route()
                .len()
                .cmp(&a.route().len())
                .then_with(|| a.route().cmp(b.route()))
        });
        tracing::info!(routes = self.endpoints.len(), "route registry built");
        Registry {
            endpoints: self.endpoints,
            cors: self.cors,
        }
    }

    fn position(&self, route: &str) -> Option<usize> {
        self.endpoints.iter().position(|e| e.route() == route)
    }
}

/// Immutable map from route prefixes to endpoints.
#[derive(Debug, Clone)]
pub struct Registry {
    endpoints: Vec<Endpoint>,
    cors: Option<Cors>,
}

impl Registry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Iterates over the registered routes, longest first.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(Endpoint::route)
    }

    /// Finds the endpoint whose route is the longest prefix of `path` on a
    /// segment boundary.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Endpoint> {
        self.endpoints
            .iter()
            .find(|endpoint| route_suffix(path, endpoint.route()).is_some())
    }

    /// Dispatches an `http::Request`.
    pub async fn dispatch(&self, request: Request<Bytes>) -> Response<Bytes> {
        self.dispatch_context(&ExtractionContext::from_request(request))
            .await
    }

    /// Dispatches an already-built request context.
    ///
    /// Preflight requests are answered by [`Cors`] when configured. A path
    /// no route covers gets `404`.
    pub async fn dispatch_context(&self, ctx: &ExtractionContext) -> Response<Bytes> {
        if let Some(preflight) = self.cors.as_ref().and_then(|c| c.preflight(ctx.method())) {
            return preflight;
        }

        let endpoint = self.lookup(ctx.path());
        let span = tracing::info_span!(
            "request",
            http.method = %ctx.method(),
            http.path = ctx.path(),
            route = endpoint.map(Endpoint::route),
        );

        let mut response = async {
            let response = match endpoint {
                Some(endpoint) => endpoint.serve(ctx).await,
                None => ErrorResponse::not_found(ctx.path()).into_response(),
            };
            tracing::info!(http.status_code = response.status().as_u16(), "request served");
            response
        }
        .instrument(span)
        .await;

        if let Some(cors) = &self.cors {
            cors.apply(&mut response);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use sieve_core::ParamSpec;

    use crate::{handler_fn, TextResponse};

    fn schema(route: &str) -> Schema {
        Schema::compile(route, Vec::<ParamSpec>::new()).unwrap()
    }

    fn named(name: &'static str) -> impl Handler {
        handler_fn(move |_args, _ctx| Ok(TextResponse::new(name).into_response()))
    }

    fn registry() -> Registry {
        Registry::builder()
            .route(schema("/api"), named("api"))
            .unwrap()
            .route(schema("/api/users/"), named("users"))
            .unwrap()
            .build()
    }

    #[test]
    fn test_longest_prefix() {
        let registry = registry();
        assert_eq!(registry.lookup("/api/users/7").unwrap().route(), "/api/users");
        assert_eq!(registry.lookup("/api/usersx").unwrap().route(), "/api");
        assert_eq!(registry.lookup("/api").unwrap().route(), "/api");
        assert!(registry.lookup("/apiary").is_none());
        assert_eq!(registry.routes().collect::<Vec<_>>(), vec!["/api/users", "/api"]);
    }

    #[test]
    fn test_duplicate_route() {
        let err = Registry::builder()
            .route(schema("/a"), named("1"))
            .unwrap()
            .route(schema("/a/"), named("2"))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateRoute("/a".into()));
    }

    #[test]
    fn test_unknown_handler_route() {
        let err = Registry::builder().handler("/missing", named("x")).unwrap_err();
        assert_eq!(err, RegistryError::UnknownRoute("/missing".into()));
    }

    #[tokio::test]
    async fn test_declare_then_attach() {
        let builder = Registry::builder()
            .declare(schema("/a"))
            .unwrap()
            .declare(schema("/b"))
            .unwrap()
            .handler("/a/", named("a"))
            .unwrap();
        let registry = builder.build();

        let request = |uri: &'static str| Request::get(uri).body(Bytes::new()).unwrap();
        let response = registry.dispatch(request("/a")).await;
        assert_eq!(&response.body()[..], b"a");
        let response = registry.dispatch(request("/b")).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = registry()
            .dispatch(Request::get("/other").body(Bytes::new()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_empty() {
        let registry = Registry::builder().build();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
