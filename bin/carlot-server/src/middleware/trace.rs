use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ServerError;

pub static X_TRACE_ID: &str = "x-trace-id";

/// JSON bodies are buffered for logging up to this size; larger request
/// bodies are refused with 413. Matches axum's default body limit.
pub const MAX_BUFFERED_BODY: usize = 2 * 1024 * 1024;

/// JSON bodies up to this size are logged verbatim at debug level.
const MAX_LOGGED_BODY: usize = 1024;

/// Wraps each request in an `http_request` span carrying a trace id, and logs
/// status and latency on the way out.
///
/// The trace id is taken from an incoming `x-trace-id` header when it is a
/// UUID, generated otherwise, and echoed on the response.
pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        debug!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let mut response = match forward(req, next, header_value.as_ref()).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        };
        if let Some(value) = header_value {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}

async fn forward(
    req: Request<Body>,
    next: Next,
    trace_id: Option<&HeaderValue>,
) -> Result<Response, ServerError> {
    let (mut parts, body) = req.into_parts();
    let body = buffer_json_body("request", &parts.headers, body)
        .await
        .map_err(|e| {
            if e.into_inner().downcast_ref::<LengthLimitError>().is_some() {
                ServerError::PayloadTooLarge { limit: MAX_BUFFERED_BODY }
            } else {
                ServerError::BadRequest("failed to read request body".to_owned())
            }
        })?;
    if let Some(value) = trace_id {
        parts.headers.insert(X_TRACE_ID, value.clone());
    }

    let response = next.run(Request::from_parts(parts, body)).await;
    let (parts, body) = response.into_parts();
    let body = buffer_json_body("response", &parts.headers, body)
        .await
        .map_err(|e| {
            warn!(error = %e, "failed to buffer response body");
            ServerError::Internal("failed to produce response")
        })?;
    Ok(Response::from_parts(parts, body))
}

/// Buffers small JSON bodies (up to [`MAX_BUFFERED_BODY`]) and logs them;
/// anything else is passed through untouched so static files keep streaming.
async fn buffer_json_body(
    direction: &str,
    headers: &HeaderMap,
    body: Body,
) -> Result<Body, axum::Error> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        return Ok(body);
    }

    let bytes = axum::body::to_bytes(body, MAX_BUFFERED_BODY).await?;
    match std::str::from_utf8(&bytes) {
        Ok(text) if bytes.len() <= MAX_LOGGED_BODY => debug!("{direction} body: {text}"),
        _ => debug!("{direction} body: [skipped, {} bytes]", bytes.len()),
    }
    Ok(Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    fn echo_app() -> Router {
        Router::new()
            .route("/echo", post(|body: Bytes| async move { body }))
            .layer(middleware::from_fn(trace_middleware))
    }

    fn json_request(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn json_bodies_pass_through_intact() {
        let response = echo_app()
            .oneshot(json_request(Body::from(r#"{"query":"red"}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_TRACE_ID));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"query":"red"}"#);
    }

    #[tokio::test]
    async fn oversized_json_body_is_refused() {
        let body = Body::from(vec![b' '; MAX_BUFFERED_BODY + 1]);
        let response = echo_app().oneshot(json_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.headers().contains_key(X_TRACE_ID));
        assert_eq!(body_json(response).await["error"], "payload too large");
    }

    #[tokio::test]
    async fn unreadable_body_is_a_bad_request() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"{\"query\":")),
            Err(std::io::Error::other("connection reset")),
        ];
        let body = Body::from_stream(futures::stream::iter(chunks));
        let response = echo_app().oneshot(json_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "bad request");
    }

    #[tokio::test]
    async fn trace_id_from_caller_is_kept() {
        let id = Uuid::new_v4().to_string();
        let request = Request::builder()
            .method("POST")
            .uri("/echo")
            .header(X_TRACE_ID, &id)
            .body(Body::from("plain"))
            .unwrap();
        let response = echo_app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[X_TRACE_ID], id.as_str());
    }
}
