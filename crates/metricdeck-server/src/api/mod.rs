mod instagram;
mod twitter;

use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use metricdeck_instagram::InstagramClient;
use metricdeck_store::CredentialStore;
use metricdeck_twitter::TwitterClient;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub twitter: TwitterClient,
    pub instagram: InstagramClient,
}

/// Request body shared by both adapters. `metric` is honored only by the
/// Instagram adapter and ignored elsewhere.
#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    #[serde(default, rename = "accountId")]
    pub account_id: Option<String>,
    #[serde(default)]
    pub metric: Option<String>,
}

/// Uniform failure taxonomy for the insight handlers. Every error a handler
/// can hit is converted to exactly one of these before it reaches the caller.
#[derive(Debug)]
pub enum InsightError {
    /// The caller omitted the account reference.
    MissingParameter,
    /// No credential row exists, or the store itself failed (the two are
    /// deliberately not distinguished to the caller).
    NotConnected,
    /// The platform rejected the metrics call; its message is passed through.
    Upstream { message: String, code: Option<i64> },
    /// Anything unanticipated. Never carries a raw upstream error.
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<i64>,
}

impl IntoResponse for InsightError {
    fn into_response(self) -> axum::response::Response {
        let (status, envelope) = match self {
            InsightError::MissingParameter => (
                StatusCode::BAD_REQUEST,
                ErrorEnvelope {
                    error: "Missing accountId".to_string(),
                    code: None,
                },
            ),
            InsightError::NotConnected => (
                StatusCode::NOT_FOUND,
                ErrorEnvelope {
                    error: "Account not found or not connected".to_string(),
                    code: None,
                },
            ),
            InsightError::Upstream { message, code } => (
                StatusCode::BAD_REQUEST,
                ErrorEnvelope {
                    error: message,
                    code,
                },
            ),
            InsightError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorEnvelope {
                    error: message,
                    code: None,
                },
            ),
        };
        (status, Json(envelope)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

/// Parses the request body leniently: an absent or non-JSON body is a
/// caller defect and gets the `MissingParameter` envelope, never a framework
/// rejection — the envelopes are designed contracts.
pub(super) fn parse_insight_request(body: &[u8]) -> Result<InsightRequest, InsightError> {
    if body.is_empty() {
        return Err(InsightError::MissingParameter);
    }
    serde_json::from_slice(body).map_err(|_| InsightError::MissingParameter)
}

/// Validates presence of the account reference. Runs before any store or
/// network access so a caller defect costs nothing upstream.
pub(super) fn require_account_id(request: &InsightRequest) -> Result<&str, InsightError> {
    match request.account_id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(InsightError::MissingParameter),
    }
}

/// Resolves the stored credential for an account.
///
/// A store failure and a missing row both map to [`InsightError::NotConnected`];
/// the distinction is logged but not surfaced, because neither is actionable
/// differently by the client.
pub(super) async fn resolve_credential(
    state: &AppState,
    req_id: &RequestId,
    account_id: &str,
) -> Result<String, InsightError> {
    match state.store.credential_for_account(account_id).await {
        Ok(Some(token)) => Ok(token),
        Ok(None) => Err(InsightError::NotConnected),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "credential store lookup failed");
            Err(InsightError::NotConnected)
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/insights/twitter", post(twitter::twitter_insights))
        .route(
            "/api/insights/instagram",
            post(instagram::instagram_insights),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
