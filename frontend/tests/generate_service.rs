use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use commenter_app::{
    client,
    view_model::{Applied, GENERATE_FAILED_MESSAGE},
    ClientError, Endpoint, GenerateRequest, PageState,
};

/// Requests the stub service has seen, with their content type.
#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(Option<String>, GenerateRequest)>>>);

impl Seen {
    fn take(&self) -> Vec<(Option<String>, GenerateRequest)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

async fn echo_handler(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(payload): Json<GenerateRequest>,
) -> Json<serde_json::Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let response = serde_json::json!({
        "commented_code": format!("# commented\n{}", payload.code),
        "documentation": format!("{} bytes documented", payload.code.len()),
    });
    seen.0.lock().unwrap().push((content_type, payload));
    Json(response)
}

async fn failing_handler() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded")
}

async fn serve(router: Router) -> Endpoint {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Endpoint::new(format!("http://{}/generate", addr))
}

async fn echo_service() -> (Endpoint, Seen) {
    let seen = Seen::default();
    let router = Router::new()
        .route("/generate", post(echo_handler))
        .with_state(seen.clone());
    (serve(router).await, seen)
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_code_as_json_once_per_call() {
    let (endpoint, seen) = echo_service().await;
    let code = "class A:\n    pass\n<script>";

    let response = client::generate(&endpoint, code).await.unwrap();
    assert_eq!(response.commented_code, format!("# commented\n{}", code));

    let requests = seen.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0.as_deref(), Some("application/json"));
    assert_eq!(requests[0].1.code, code);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_input_is_forwarded() {
    let (endpoint, seen) = echo_service().await;

    let response = client::generate(&endpoint, "").await.unwrap();
    assert_eq!(response.documentation, "0 bytes documented");
    assert_eq!(seen.take()[0].1.code, "");
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_is_reported() {
    let router = Router::new().route("/generate", post(failing_handler));
    let endpoint = serve(router).await;

    match client::generate(&endpoint, "x = 1").await {
        Err(ClientError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_service_is_reported() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Endpoint::new(format!("http://{}/generate", addr));
    let result = client::generate(&endpoint, "x = 1").await;
    assert!(matches!(result, Err(ClientError::Transport(_))), "{:?}", result);
}

#[tokio::test(flavor = "multi_thread")]
async fn page_round_trip_against_stub() {
    let (endpoint, _seen) = echo_service().await;
    let mut page = PageState::default();
    page.code_input = "def f(): pass".to_owned();

    let pending = page.begin_generate();
    let outcome = client::generate(&endpoint, &pending.code).await;
    assert_eq!(page.apply_outcome(pending.ticket, outcome), Applied::Success);

    assert_eq!(page.code_output(), "# commented\ndef f(): pass");
    assert_eq!(page.doc_output(), "13 bytes documented");
    assert!(page.download_visible());
    assert_eq!(page.documentation_file().bytes, b"13 bytes documented");

    let broken = Endpoint::new(format!("{}/missing", endpoint.generate_url));
    let pending = page.begin_generate();
    let outcome = client::generate(&broken, &pending.code).await;
    assert_eq!(page.apply_outcome(pending.ticket, outcome), Applied::Failure);

    assert_eq!(page.code_output(), GENERATE_FAILED_MESSAGE);
    assert_eq!(page.doc_output(), "13 bytes documented");
}
