//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};

/// The number of bytes of a request or response body logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = read_body(body, "request").await;
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = read_body(body, "response").await;
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body, kind: &str) -> Bytes {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .inspect_err(|error| tracing::error!("Could not read {kind} body: {error}"))
        .unwrap_or_default()
}

/// The longest prefix of `body` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate_body(body: &str) -> &str {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return body;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    let truncated = truncate_body(body);

    if truncated.len() < body.len() {
        tracing::info!(
            method = %parts.method,
            uri = %parts.uri,
            "Received request: {:#?}\nbody: {truncated}...",
            parts.headers
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            method = %parts.method,
            uri = %parts.uri,
            "Received request: {:#?}\nbody: {body:?}",
            parts.headers
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    let truncated = truncate_body(body);

    if truncated.len() < body.len() {
        tracing::info!(
            status = %parts.status,
            "Sending response: {:#?}\nbody: {truncated}...",
            parts.headers
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!(
            status = %parts.status,
            "Sending response: {:#?}\nbody: {body:?}",
            parts.headers
        );
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware, routing::post};
    use axum_test::TestServer;

    use super::{LOG_BODY_LENGTH_LIMIT, logging_middleware, truncate_body};

    #[test]
    fn short_body_is_not_truncated() {
        assert_eq!(truncate_body("on_duty=true"), "on_duty=true");
    }

    #[test]
    fn long_body_is_truncated_on_char_boundary() {
        let body = "é".repeat(LOG_BODY_LENGTH_LIMIT);

        let truncated = truncate_body(&body);

        assert!(truncated.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(body.starts_with(truncated));
        assert_eq!(truncated.chars().count(), LOG_BODY_LENGTH_LIMIT / 2);
    }

    #[tokio::test]
    async fn middleware_passes_body_through() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app).expect("Could not create test server.");
        let body = "x".repeat(LOG_BODY_LENGTH_LIMIT * 2);

        let response = server.post("/echo").text(body.clone()).await;

        response.assert_status_ok();
        assert_eq!(response.text(), body);
    }
}
