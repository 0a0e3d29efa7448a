mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use common::{gzip, local_identity, multipart_body, multipart_content_type, test_config, RecordingSubmitter, FASTQ_RECORD};
use rnaseek_core::{create_app, shell::LOGIN_REQUIRED_NOTICE, AppState, AuthState, IdentityClient};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn setup_app() -> (Router, IdentityClient, Arc<RecordingSubmitter>) {
    let config = test_config();
    let identity = local_identity(&config);
    let submitter = Arc::new(RecordingSubmitter::default());
    let state = AppState::new(config, identity.clone(), submitter.clone());
    (create_app(state), identity, submitter)
}

async fn send(app: &Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn upload(app: &Router, filename: &str, content_type: &str, data: &[u8]) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tools/select")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body(filename, content_type, data)))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn form_state(app: &Router) -> Value {
    let response = send(app, Method::GET, "/api/tools/state").await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_static_pages_render() {
    let (app, _identity, _submitter) = setup_app();

    for (uri, title) in [
        ("/", "Welcome to RNAseek"),
        ("/about", "About RNAseek"),
        ("/contact", "Contact and Troubleshooting"),
    ] {
        let response = send(&app, Method::GET, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let html = body_text(response).await;
        assert!(html.contains(title), "{} should contain {}", uri, title);
    }
}

#[tokio::test]
async fn test_tools_page_follows_auth_signal() {
    let (app, identity, _submitter) = setup_app();

    let html = body_text(send(&app, Method::GET, "/tools").await).await;
    assert!(html.contains("Loading..."));
    assert!(!html.contains("type=\"file\""));

    identity.signal().publish(AuthState::Resolved(None));
    let html = body_text(send(&app, Method::GET, "/tools").await).await;
    assert!(html.contains(LOGIN_REQUIRED_NOTICE));
    assert!(html.contains("action=\"/auth/login\""));
    assert!(!html.contains("href=\"/tools\""));

    let response = send(&app, Method::POST, "/auth/login").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let html = body_text(send(&app, Method::GET, "/tools").await).await;
    assert!(html.contains("type=\"file\""));
    assert!(html.contains("Welcome,"));
    assert!(html.contains("href=\"/tools\""));
}

#[tokio::test]
async fn test_tool_actions_require_signed_in_user() {
    let (app, identity, submitter) = setup_app();
    identity.signal().publish(AuthState::Resolved(None));

    let response = upload(&app, "reads.fastq", "text/plain", FASTQ_RECORD.as_bytes()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, Method::POST, "/tools/submit").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, Method::GET, "/api/tools/state").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(submitter.calls(), 0);
}

#[tokio::test]
async fn test_select_submit_and_clear_over_http() {
    let (app, _identity, submitter) = setup_app();
    send(&app, Method::POST, "/auth/login").await;

    let response = upload(&app, "sample1.fastq.gz", "application/gzip", &gzip(FASTQ_RECORD)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/tools");

    let state = form_state(&app).await;
    assert_eq!(state["success"], true);
    assert_eq!(state["data"]["state"]["kind"], "file_selected");
    assert_eq!(state["data"]["selected_file"]["name"], "sample1.fastq.gz");
    assert_eq!(state["data"]["can_submit"], true);

    let response = send(&app, Method::POST, "/tools/submit").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    {
        let payloads = submitter.payloads.lock();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].field_name, "file");
        assert_eq!(payloads[0].file.name, "sample1.fastq");
        assert_eq!(payloads[0].file.as_text(), Some(FASTQ_RECORD));
    }

    let html = body_text(send(&app, Method::GET, "/tools").await).await;
    assert!(html.contains("File processed successfully!"));

    let response = send(&app, Method::POST, "/tools/clear").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let state = form_state(&app).await;
    assert_eq!(state["data"]["state"]["kind"], "empty");
    assert!(state["data"]["selected_file"].is_null());
    assert_eq!(state["data"]["can_clear"], false);
}

#[tokio::test]
async fn test_invalid_selection_shows_error() {
    let (app, _identity, submitter) = setup_app();
    send(&app, Method::POST, "/auth/login").await;

    let response = upload(&app, "notes.pdf", "application/pdf", b"%PDF").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let state = form_state(&app).await;
    assert_eq!(state["data"]["state"]["kind"], "empty");
    assert_eq!(
        state["data"]["error"],
        "Invalid file type. Please upload a .fastq or .fastq.gz file."
    );
    assert_eq!(state["data"]["picker_value"], "notes.pdf");

    let response = send(&app, Method::POST, "/tools/submit").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(submitter.calls(), 0);
}

#[tokio::test]
async fn test_failed_submission_surfaces_message() {
    let config = test_config();
    let identity = local_identity(&config);
    let submitter = Arc::new(RecordingSubmitter::failing("Processing failed: HTTP 503"));
    let app = create_app(AppState::new(config, identity, submitter.clone()));
    send(&app, Method::POST, "/auth/login").await;

    upload(&app, "reads.fastq", "text/plain", FASTQ_RECORD.as_bytes()).await;
    send(&app, Method::POST, "/tools/submit").await;

    let state = form_state(&app).await;
    assert_eq!(state["data"]["state"]["kind"], "submitted");
    assert_eq!(state["data"]["state"]["outcome"]["result"], "failure");
    assert_eq!(state["data"]["error"], "Processing failed: HTTP 503");
    assert_eq!(state["data"]["can_submit"], true);
    assert_eq!(submitter.calls(), 1);
}

#[tokio::test]
async fn test_logout_hides_form() {
    let (app, identity, _submitter) = setup_app();
    send(&app, Method::POST, "/auth/login").await;
    assert!(identity.current_user().is_some());

    let response = send(&app, Method::POST, "/auth/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(identity.current_user().is_none());

    let html = body_text(send(&app, Method::GET, "/tools").await).await;
    assert!(!html.contains("type=\"file\""));
}

#[tokio::test]
async fn test_health_reports_auth_and_form() {
    let (app, _identity, _submitter) = setup_app();

    let response = send(&app, Method::GET, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["auth_resolved"], false);
    assert_eq!(body["data"]["submitting"], false);
}
