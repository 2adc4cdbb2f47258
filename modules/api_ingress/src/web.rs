use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use std::any::Any;
use std::fmt::Write as _;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Liveness probe.
pub async fn ping() -> &'static str {
    "pong\n"
}

/// Echo every request header as `name: value`, one line per value.
pub async fn echo_headers(headers: HeaderMap) -> String {
    let mut out = String::new();
    for (name, value) in headers.iter() {
        let value = value.to_str().unwrap_or("<non-utf8>");
        let _ = writeln!(out, "{name}: {value}");
    }
    out
}

/// Converts a handler panic into a plain 500 so the process keeps serving.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}
