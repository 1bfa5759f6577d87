//! Unified server error type.
//!
//! Handlers return `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a JSON body of the form
//! `{"message": ..., "error": ...}` with an appropriate status code.
//!
//! Store failures are logged with full detail but the caller only sees the
//! handler's generic message, so SQL and file paths never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use carlot_catalog::CatalogError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// A catalog operation failed; `context` is the client-facing message.
    #[error("{context}: {source}")]
    Catalog {
        context: &'static str,
        #[source]
        source: CatalogError,
    },

    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A request body exceeded the buffering limit.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// A failure outside the catalog; `0` is the client-facing message.
    #[error("{0}")]
    Internal(&'static str),
}

impl ServerError {
    pub fn catalog(context: &'static str, source: CatalogError) -> Self {
        Self::Catalog { context, source }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match &self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone(), "bad request"),
            ServerError::PayloadTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string(), "payload too large")
            }
            ServerError::Internal(m) => {
                error!(message = *m, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, (*m).to_owned(), "internal server error")
            }
            ServerError::Catalog { context, source } => match source {
                CatalogError::InvalidFilterValue { .. } | CatalogError::UnknownFilter(_) => {
                    (StatusCode::BAD_REQUEST, source.to_string(), "invalid filter")
                }
                CatalogError::Store(_) | CatalogError::Extract(_) => {
                    error!(error = %source, context, "catalog request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        (*context).to_owned(),
                        "internal server error",
                    )
                }
            },
        };
        (status, Json(json!({ "message": message, "error": kind }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carlot_catalog::StoreError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn store_errors_hide_details() {
        let err = ServerError::catalog(
            "Error retrieving cars",
            StoreError::QueryFailed("no such table: cars".into()).into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Error retrieving cars");
        assert_eq!(body["error"], "internal server error");
        assert!(!body.to_string().contains("no such table"));
    }

    #[tokio::test]
    async fn invalid_filter_is_a_client_error() {
        let err = ServerError::catalog(
            "Error retrieving cars",
            CatalogError::InvalidFilterValue { field: "seats".into(), value: "5abc".into() },
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid filter");
        assert!(body["message"].as_str().unwrap().contains("seats"));
    }
}
