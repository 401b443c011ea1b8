//! Full request dispatch through a registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::{header, Method, Request, Response, StatusCode};
use sieve_core::{ParamSpec, ParamType, ParsedArgs, Scalar, Schema, UsageDoc};
use sieve_extract::ExtractionContext;
use sieve_server::{Cors, Handler, HandlerError, JsonResponse, Registry};

/// Counts calls and echoes resolved arguments as JSON.
#[derive(Default)]
struct Echo {
    calls: AtomicUsize,
}

#[async_trait]
impl Handler for Echo {
    async fn handle(
        &self,
        args: &ParsedArgs,
        ctx: &ExtractionContext,
    ) -> Result<Response<Bytes>, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(JsonResponse::new(serde_json::json!({
            "method": ctx.method().as_str(),
            "user": args.string("user"),
            "limit": args.integer("limit"),
            "tags": args.strings("tags"),
            "segments": args.segments(),
        }))
        .into_response())
    }
}

fn search_schema() -> Schema {
    Schema::builder("/search")
        .purpose("search users")
        .param(ParamSpec::new("user").required().memo("user name"))
        .param(
            ParamSpec::new("limit")
                .of_type(ParamType::Int)
                .default_value(10)
                .check(|value| match value {
                    Some(Scalar::Int(n)) if *n <= 100 => Ok(()),
                    _ => Err("at most 100".to_string()),
                }),
        )
        .param(ParamSpec::new("tags"))
        .with_help()
        .compile()
        .unwrap()
}

fn setup() -> (Registry, Arc<Echo>) {
    let echo = Arc::new(Echo::default());
    let registry = Registry::builder()
        .cors(Cors::permissive())
        .route(search_schema(), Arc::clone(&echo))
        .unwrap()
        .build();
    (registry, echo)
}

fn json(response: &Response<Bytes>) -> serde_json::Value {
    serde_json::from_slice(response.body()).unwrap()
}

#[tokio::test]
async fn query_request() {
    let (registry, echo) = setup();
    let request = Request::get("/search/a/b?user=ann&limit=0x20&tags=x&tags=y")
        .body(Bytes::new())
        .unwrap();
    let response = registry.dispatch(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let body = json(&response);
    assert_eq!(body["user"], "ann");
    assert_eq!(body["limit"], 32);
    assert_eq!(body["tags"], serde_json::json!(["x", "y"]));
    assert_eq!(body["segments"], serde_json::json!(["a", "b"]));
    assert_eq!(echo.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn form_body_and_cookie() {
    let (registry, _) = setup();
    let request = Request::post("/search?limit=5")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, "user=cookie; limit=7")
        .body(Bytes::from_static(b"user=form&limit=6"))
        .unwrap();
    let body = json(&registry.dispatch(request).await);

    assert_eq!(body["user"], "form");
    assert_eq!(body["limit"], 5);
    assert_eq!(body["method"], "POST");
}

#[tokio::test]
async fn multipart_body() {
    let (registry, _) = setup();
    let payload = "--XYZ\r\n\
        Content-Disposition: form-data; name=\"user\"\r\n\r\n\
        bob\r\n\
        --XYZ\r\n\
        Content-Disposition: form-data; name=\"upload\"; filename=\"a.txt\"\r\n\
        Content-Type: text/plain\r\n\r\n\
        ignored\r\n\
        --XYZ--\r\n";
    let request = Request::put("/search")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(Bytes::from(payload))
        .unwrap();
    let response = registry.dispatch(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(&response)["user"], "bob");
}

#[tokio::test]
async fn argument_errors_skip_handler() {
    let (registry, echo) = setup();
    let request = Request::get("/search?limit=500").body(Bytes::new()).unwrap();
    let response = registry.dispatch(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let doc: UsageDoc = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(doc.uri, "/search?[help]&[limit]&[tags]&<user>");
    assert_eq!(
        doc.errors.unwrap(),
        vec![r#""500": at most 100 (arg:limit)"#, r#"missing "user""#]
    );
    assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unsupported_media_type() {
    let (registry, _) = setup();
    let request = Request::post("/search?user=a")
        .header(header::CONTENT_TYPE, "application/xml")
        .body(Bytes::from_static(b"<user/>"))
        .unwrap();
    let response = registry.dispatch(request).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        json(&response)["err"][0],
        "invalid content-type 'application/xml'"
    );
}

#[tokio::test]
async fn help_and_preflight() {
    let (registry, echo) = setup();

    let response = registry
        .dispatch(Request::get("/search?help").body(Bytes::new()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = json(&response);
    assert_eq!(doc["for"], "search users");
    assert!(doc.get("err").is_none());
    assert_eq!(doc["arg"][1]["check"], "at most 100");

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/anything")
        .body(Bytes::new())
        .unwrap();
    let response = registry.dispatch(preflight).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "DELETE, POST, GET, OPTIONS"
    );
    assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_path() {
    let (registry, _) = setup();
    let response = registry
        .dispatch(Request::get("/searching").body(Bytes::new()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
