use std::collections::BTreeMap;

use axum::{body::Bytes, extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use metricdeck_twitter::{
    normalize_recent_tweets, normalize_user_metrics, TweetSummary, TwitterError,
};

use crate::middleware::RequestId;

use super::{
    parse_insight_request, require_account_id, resolve_credential, AppState, InsightError,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TwitterInsightsBody {
    user_metrics: BTreeMap<String, i64>,
    recent_tweets: Vec<TweetSummary>,
    fetched_at: DateTime<Utc>,
}

/// Twitter/X insight orchestrator.
///
/// Validate → resolve credential → metrics call (fatal on failure) →
/// posts call (degrades to an empty list) → normalize. The posts call needs
/// the user id from the metrics call, so a metrics failure structurally
/// prevents the posts call from being attempted.
pub(super) async fn twitter_insights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<TwitterInsightsBody>, InsightError> {
    let request = parse_insight_request(&body)?;
    let account_id = require_account_id(&request)?;
    let token = resolve_credential(&state, &req_id, account_id).await?;

    let user = state
        .twitter
        .fetch_authed_user(&token)
        .await
        .map_err(|e| metrics_call_error(&req_id, &e))?;

    let tweets = match state.twitter.fetch_recent_tweets(&token, &user.id).await {
        Ok(tweets) => tweets,
        Err(e) => {
            log_posts_failure(&req_id, &e);
            Vec::new()
        }
    };

    Ok(Json(TwitterInsightsBody {
        user_metrics: normalize_user_metrics(&user),
        recent_tweets: normalize_recent_tweets(&tweets),
        fetched_at: Utc::now(),
    }))
}

/// Maps a metrics-call failure onto the envelope taxonomy. Platform and
/// transport failures are both upstream defects; a malformed success body is
/// unanticipated and stays internal.
fn metrics_call_error(req_id: &RequestId, error: &TwitterError) -> InsightError {
    match error {
        TwitterError::Api { message, code } => {
            tracing::warn!(
                request_id = %req_id.0,
                code = ?code,
                message = %message,
                "twitter metrics call rejected by platform"
            );
            InsightError::Upstream {
                message: message.clone(),
                code: *code,
            }
        }
        TwitterError::Http(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "twitter metrics call failed");
            InsightError::Upstream {
                message: e.to_string(),
                code: None,
            }
        }
        TwitterError::Deserialize { .. } => {
            tracing::error!(request_id = %req_id.0, error = %error, "twitter metrics response malformed");
            InsightError::Internal("failed to decode platform response".to_string())
        }
    }
}

/// Posts-call failures never fail the request; they are logged with the
/// failure kind so platform rejections and transport faults stay
/// distinguishable in diagnostics.
fn log_posts_failure(req_id: &RequestId, error: &TwitterError) {
    let kind = match error {
        TwitterError::Api { .. } => "platform",
        TwitterError::Http(_) => "transport",
        TwitterError::Deserialize { .. } => "decode",
    };
    tracing::warn!(
        request_id = %req_id.0,
        error_kind = kind,
        error = %error,
        "twitter posts call failed; continuing with empty list"
    );
}
