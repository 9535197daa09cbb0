//! HTTP handlers for the contact mailer.

use crate::error::DispatchError;
use crate::metrics::MetricsSummary;
use crate::server::AppState;
use crate::services::DispatchResponse;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Dispatch endpoint.
///
/// Mounted for every method so that the dispatch service, not the router,
/// answers non-POST requests with its structured 405. A POST body that is
/// not UTF-8 cannot be JSON and is rejected as malformed.
pub async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    let response = match std::str::from_utf8(&body) {
        Ok(body) => state.dispatcher.handle(method.as_str(), body).await,
        Err(e) if method == Method::POST => {
            let err = DispatchError::MalformedRequest(format!("Request body is not UTF-8: {}", e));
            tracing::error!("Error in send-email dispatch: {}", err);
            DispatchResponse::from(&err)
        }
        Err(_) => state.dispatcher.handle(method.as_str(), "").await,
    };

    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<MetricsSummary>,
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            metrics: state.metrics.as_ref().map(|m| m.summary()),
        }),
    )
}
