//! Integration tests for [`RenderClient`] against an in-process mock
//! render backend.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use mograph_core::outcome::{RenderFailureKind, RenderOutcome};
use mograph_renderer::{RenderClient, RenderJob, RendererConfig};

const CODE: &str = "const Intro: React.FC = () => null;\nexport default Intro;\n";

/// Serve `router` on an ephemeral port and return the render URL.
async fn spawn_mock(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{addr}/render")
}

fn write_code_file() -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new()
        .suffix(".tsx")
        .tempfile()
        .expect("create temp file");
    write!(f, "{CODE}").expect("write code");
    f
}

fn client(url: String, timeout: Duration) -> RenderClient {
    RenderClient::new(RendererConfig { url, timeout }).expect("build client")
}

fn job(file: &tempfile::NamedTempFile) -> RenderJob {
    RenderJob::new(file.path(), "Intro", "intro_final").with_duration(3)
}

// ---------------------------------------------------------------------------
// Test: 200 with a full body maps every backend field exactly
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_success_body_is_mapped_exactly() {
    let router = Router::new().route(
        "/render",
        post(|| async {
            Json(json!({
                "video_path": "/out/Intro.mp4",
                "filename": "Intro.mp4",
                "render_time_seconds": 27.5,
                "file_size_mb": 4.2,
                "message": "Rendered on worker 3",
            }))
        }),
    );
    let url = spawn_mock(router).await;
    let file = write_code_file();

    let outcome = client(url, Duration::from_secs(5)).render(&job(&file)).await;

    assert_eq!(
        outcome,
        RenderOutcome::Success {
            video_path: Some("/out/Intro.mp4".to_string()),
            filename: "Intro.mp4".to_string(),
            render_time_seconds: 27.5,
            file_size_mb: 4.2,
            message: "Rendered on worker 3".to_string(),
        }
    );
}

// ---------------------------------------------------------------------------
// Test: 200 with no optional fields applies the defaults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_success_body_uses_defaults() {
    let router = Router::new().route("/render", post(|| async { Json(json!({})) }));
    let url = spawn_mock(router).await;
    let file = write_code_file();

    let outcome = client(url, Duration::from_secs(5)).render(&job(&file)).await;

    assert_eq!(
        outcome,
        RenderOutcome::Success {
            video_path: None,
            filename: "intro_final.mp4".to_string(),
            render_time_seconds: 0.0,
            file_size_mb: 0.0,
            message: String::new(),
        }
    );
}

// ---------------------------------------------------------------------------
// Test: the payload carries the file's code and the fixed frame rate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn payload_contains_code_and_composition_metadata() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);
    let router = Router::new().route(
        "/render",
        post(move |Json(body): Json<Value>| {
            let sink = Arc::clone(&sink);
            async move {
                *sink.lock().unwrap() = Some(body);
                Json(json!({ "filename": "x.mp4" }))
            }
        }),
    );
    let url = spawn_mock(router).await;
    let file = write_code_file();

    let outcome = client(url, Duration::from_secs(5)).render(&job(&file)).await;
    assert!(outcome.is_success());

    let body = captured.lock().unwrap().take().expect("payload captured");
    assert_eq!(
        body,
        json!({
            "code": CODE,
            "composition_id": "Intro",
            "duration": 3,
            "width": 1080,
            "height": 1920,
            "fps": 30,
        })
    );
}

// ---------------------------------------------------------------------------
// Test: HTTP 500 with a JSON error field surfaces that text
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_with_json_error_field() {
    let router = Router::new().route(
        "/render",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))) }),
    );
    let url = spawn_mock(router).await;
    let file = write_code_file();

    let outcome = client(url, Duration::from_secs(5)).render(&job(&file)).await;

    match outcome {
        RenderOutcome::Failure { kind, error } => {
            assert_eq!(kind, RenderFailureKind::Backend);
            assert!(error.contains("boom"), "unexpected error text: {error}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: HTTP 500 with an empty body reports the bare status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_with_empty_body() {
    let router = Router::new().route(
        "/render",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let url = spawn_mock(router).await;
    let file = write_code_file();

    let outcome = client(url, Duration::from_secs(5)).render(&job(&file)).await;

    assert_eq!(outcome.error(), Some("HTTP 500"));
}

// ---------------------------------------------------------------------------
// Test: non-JSON error bodies are preserved verbatim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn plain_text_error_body_preserved() {
    let router = Router::new().route(
        "/render",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream chrome crashed") }),
    );
    let url = spawn_mock(router).await;
    let file = write_code_file();

    let outcome = client(url, Duration::from_secs(5)).render(&job(&file)).await;

    assert_eq!(outcome.error(), Some("upstream chrome crashed"));
}

// ---------------------------------------------------------------------------
// Test: a backend that never answers yields a timeout failure, not a hang
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hanging_backend_times_out() {
    let router = Router::new().route(
        "/render",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!({}))
        }),
    );
    let url = spawn_mock(router).await;
    let file = write_code_file();

    let started = Instant::now();
    let outcome = client(url, Duration::from_millis(300)).render(&job(&file)).await;

    assert!(started.elapsed() < Duration::from_secs(10));
    match outcome {
        RenderOutcome::Failure { kind, error } => {
            assert_eq!(kind, RenderFailureKind::Timeout);
            assert!(error.contains("Render timeout"));
            assert!(error.contains("shorter video"));
        }
        other => panic!("expected timeout failure, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: connection refused is a transport failure with the fault text
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connection_refused_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let file = write_code_file();

    let outcome = client(format!("http://{addr}/render"), Duration::from_secs(5))
        .render(&job(&file))
        .await;

    match outcome {
        RenderOutcome::Failure { kind, error } => {
            assert_eq!(kind, RenderFailureKind::Transport);
            assert!(error.starts_with("Render error:"));
            assert!(error.contains("refused"), "connect fault missing from {error:?}");
        }
        other => panic!("expected transport failure, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: a malformed 200 body is a backend failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_success_body_is_backend_failure() {
    let router = Router::new().route("/render", post(|| async { "<html>ok</html>" }));
    let url = spawn_mock(router).await;
    let file = write_code_file();

    let outcome = client(url, Duration::from_secs(5)).render(&job(&file)).await;

    match outcome {
        RenderOutcome::Failure { kind, error } => {
            assert_eq!(kind, RenderFailureKind::Backend);
            assert!(error.starts_with("Invalid render response"));
        }
        other => panic!("expected backend failure, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: a missing code file fails before any request is sent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_code_file_is_storage_failure() {
    let hits = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&hits);
    let router = Router::new().route(
        "/render",
        post(move || {
            let counter = Arc::clone(&counter);
            async move {
                *counter.lock().unwrap() += 1;
                Json(json!({}))
            }
        }),
    );
    let url = spawn_mock(router).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("never_written.tsx");

    let outcome = client(url, Duration::from_secs(5))
        .render(&RenderJob::new(&missing, "Intro", "intro"))
        .await;

    match outcome {
        RenderOutcome::Failure { kind, error } => {
            assert_eq!(kind, RenderFailureKind::Storage);
            assert!(error.contains("never_written.tsx"));
        }
        other => panic!("expected storage failure, got {other:?}"),
    }
    assert_eq!(*hits.lock().unwrap(), 0);
}
