//! A schema bound to a handler.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::{Request, Response};
use sieve_core::Schema;
use sieve_extract::{ExtractConfig, ExtractionContext};

use crate::{ErrorResponse, Handler, JsonResponse, NotImplemented};

/// A compiled schema, its handler and the extraction limits to parse with.
///
/// Serving a request:
/// 1. parses it against the schema;
/// 2. answers `200` with the usage document when `help` is set;
/// 3. answers the error document when there are diagnostics, with the
///    first diagnostic's status (`400`, or `413`/`415` for body problems);
/// 4. otherwise calls the handler, mapping a handler error to `500`.
#[derive(Clone)]
pub struct Endpoint {
    schema: Arc<Schema>,
    handler: Arc<dyn Handler>,
    config: ExtractConfig,
}

impl Endpoint {
    /// Binds `schema` to `handler` with default limits.
    pub fn new(schema: impl Into<Arc<Schema>>, handler: impl Handler + 'static) -> Self {
        Self {
            schema: schema.into(),
            handler: Arc::new(handler),
            config: ExtractConfig::default(),
        }
    }

    /// An endpoint whose handler answers `501`.
    pub fn unimplemented(schema: impl Into<Arc<Schema>>) -> Self {
        Self::new(schema, NotImplemented)
    }

    /// Sets the extraction limits.
    #[must_use]
    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    pub(crate) fn with_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = handler;
        self
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the route.
    #[must_use]
    pub fn route(&self) -> &str {
        self.schema.route()
    }

    /// Returns the extraction limits.
    #[must_use]
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Serves one request.
    pub async fn serve(&self, ctx: &ExtractionContext) -> Response<Bytes> {
        let args = self.schema.parse(ctx, &self.config);

        if args.help_requested() {
            return JsonResponse::new(self.schema.help()).pretty().into_response();
        }

        if let Some(first) = args.diagnostics().first() {
            let status = first.status_code();
            tracing::debug!(
                route = self.route(),
                http.status_code = status.as_u16(),
                diagnostics = args.diagnostics().len(),
                "rejected request arguments"
            );
            return JsonResponse::new(self.schema.render(args.diagnostics()))
                .with_status(status)
                .pretty()
                .into_response();
        }

        match self.handler.handle(&args, ctx).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(route = self.route(), error = %err, "handler failed");
                ErrorResponse::internal(err.to_string()).into_response()
            }
        }
    }

    /// Serves an `http::Request`.
    pub async fn serve_request(&self, request: Request<Bytes>) -> Response<Bytes> {
        self.serve(&ExtractionContext::from_request(request)).await
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("route", &self.schema.route())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode, Uri};
    use sieve_core::{ParamSpec, ParamType, UsageDoc};
    use sieve_extract::ExtractionContextBuilder;

    use crate::{handler_fn, HandlerError, TextResponse};

    fn schema() -> Schema {
        Schema::builder("/sum")
            .purpose("add two numbers")
            .param(ParamSpec::new("a").of_type(ParamType::Int).required())
            .param(ParamSpec::new("b").of_type(ParamType::Int).required())
            .with_help()
            .compile()
            .unwrap()
    }

    fn sum() -> Endpoint {
        Endpoint::new(
            schema(),
            handler_fn(|args, _ctx| {
                let total = args.integer("a") + args.integer("b");
                Ok(TextResponse::new(total.to_string()).into_response())
            }),
        )
    }

    fn get(uri: &'static str) -> ExtractionContext {
        ExtractionContextBuilder::new()
            .method(Method::GET)
            .uri(Uri::from_static(uri))
            .build()
    }

    #[tokio::test]
    async fn test_handler_called() {
        let response = sum().serve(&get("/sum?a=2&b=0x3")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&response.body()[..], b"5");
    }

    #[tokio::test]
    async fn test_help_view() {
        let response = sum().serve(&get("/sum?help")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc: UsageDoc = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(doc.purpose, "add two numbers");
        assert!(!doc.is_error());
    }

    #[tokio::test]
    async fn test_error_view() {
        let response = sum().serve(&get("/sum?a=x")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let doc: UsageDoc = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(
            doc.errors.unwrap(),
            vec![r#""x" is not an integer (arg:a)"#, r#"missing "b""#]
        );
    }

    #[tokio::test]
    async fn test_extraction_status() {
        let ctx = ExtractionContextBuilder::new()
            .method(Method::POST)
            .uri(Uri::from_static("/sum"))
            .header("content-type", "application/json")
            .body(r#"{"a": 1, "b": 2, "pad": "xxxxxxxxxxxxxxxx"}"#)
            .build();
        let endpoint = sum().with_config(ExtractConfig::default().max_body_size(8));
        let response = endpoint.serve(&ctx).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_handler_error_is_500() {
        let endpoint = Endpoint::new(
            schema(),
            handler_fn(|_args, _ctx| Err(HandlerError::failed("boom"))),
        );
        let response = endpoint.serve(&get("/sum?a=1&b=2")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unimplemented() {
        let response = Endpoint::unimplemented(schema())
            .serve_request(Request::get("/sum?a=1&b=2").body(Bytes::new()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_debug() {
        let debug = format!("{:?}", sum());
        assert!(debug.contains("/sum"));
    }
}
