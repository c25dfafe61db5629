use std::time::Instant;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info, info_span, Instrument};
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Wraps each HTTP exchange in an `mcp_http` span so dispatcher events
/// (`mcp request handled`, tool failures) carry the verb and path.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let span = info_span!(
        "mcp_http",
        verb = %request.method(),
        path = %request.uri().path(),
    );
    let started_at = Instant::now();

    let response = next.run(request).instrument(span.clone()).await;
    let status = response.status();
    let has_body = response.headers().contains_key(header::CONTENT_TYPE);

    span.in_scope(|| {
        if status == StatusCode::METHOD_NOT_ALLOWED {
            debug!("rejected non-POST verb on the MCP path");
        }

        info!(
            status = status.as_u16(),
            envelope = has_body,
            duration_ms = started_at.elapsed().as_millis(),
            "request summary"
        );
    });

    response
}
