//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Logs request method, path, status, and duration.
///
/// Shared-calendar paths carry a token, so only the route prefix is logged
/// for them.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = redact_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "HTTP request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "HTTP request"
        );
    }

    response
}

fn redact_path(path: &str) -> String {
    const SHARED: &str = "/api/shared/";
    match path.strip_prefix(SHARED) {
        Some(rest) => match rest.split_once('/') {
            Some((_, tail)) => format!("{SHARED}:token/{tail}"),
            None => format!("{SHARED}:token"),
        },
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_path_hides_tokens() {
        assert_eq!(redact_path("/api/shared/cal_abc_def_123"), "/api/shared/:token");
        assert_eq!(
            redact_path("/api/shared/cal_abc_def_123/events/42"),
            "/api/shared/:token/events/42"
        );
        assert_eq!(redact_path("/api/health"), "/api/health");
    }
}
