use std::collections::BTreeMap;

use axum::{body::Bytes, extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use metricdeck_instagram::{
    normalize_insight_metrics, normalize_recent_media, InstagramError, MediaSummary,
};

use crate::middleware::RequestId;

use super::{
    parse_insight_request, require_account_id, resolve_credential, AppState, InsightError,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InstagramInsightsBody {
    metrics: BTreeMap<String, i64>,
    recent_posts: Vec<MediaSummary>,
    fetched_at: DateTime<Utc>,
}

/// Instagram insight orchestrator.
///
/// Validate → resolve credential → insights call (fatal on failure, honoring
/// the caller's optional `metric` override) → media call (degrades to an
/// empty list) → normalize.
pub(super) async fn instagram_insights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<InstagramInsightsBody>, InsightError> {
    let request = parse_insight_request(&body)?;
    let account_id = require_account_id(&request)?;
    let token = resolve_credential(&state, &req_id, account_id).await?;

    let insights = state
        .instagram
        .fetch_insights(&token, request.metric.as_deref())
        .await
        .map_err(|e| metrics_call_error(&req_id, &e))?;

    let media = match state.instagram.fetch_recent_media(&token).await {
        Ok(media) => media,
        Err(e) => {
            log_posts_failure(&req_id, &e);
            Vec::new()
        }
    };

    Ok(Json(InstagramInsightsBody {
        metrics: normalize_insight_metrics(&insights),
        recent_posts: normalize_recent_media(&media),
        fetched_at: Utc::now(),
    }))
}

fn metrics_call_error(req_id: &RequestId, error: &InstagramError) -> InsightError {
    match error {
        InstagramError::Api { message, code } => {
            tracing::warn!(
                request_id = %req_id.0,
                code = ?code,
                message = %message,
                "instagram insights call rejected by platform"
            );
            InsightError::Upstream {
                message: message.clone(),
                code: *code,
            }
        }
        InstagramError::Http(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "instagram insights call failed");
            InsightError::Upstream {
                message: e.to_string(),
                code: None,
            }
        }
        InstagramError::Deserialize { .. } => {
            tracing::error!(request_id = %req_id.0, error = %error, "instagram insights response malformed");
            InsightError::Internal("failed to decode platform response".to_string())
        }
    }
}

fn log_posts_failure(req_id: &RequestId, error: &InstagramError) {
    let kind = match error {
        InstagramError::Api { .. } => "platform",
        InstagramError::Http(_) => "transport",
        InstagramError::Deserialize { .. } => "decode",
    };
    tracing::warn!(
        request_id = %req_id.0,
        error_kind = kind,
        error = %error,
        "instagram media call failed; continuing with empty list"
    );
}
