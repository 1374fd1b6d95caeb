//! HTTP client for the Instagram Graph API.
//!
//! Wraps `reqwest` with the adapter's credential scheme (`access_token`
//! query parameter), bounded timeouts, and platform-error detection. Graph
//! API errors arrive in-body as `{"error": {"message", "code"}}`, sometimes
//! alongside a 2xx status, so every response body is inspected before
//! deserialization.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::InstagramError;
use crate::types::{InsightMetric, InsightsResponse, MediaItem, MediaResponse};

const DEFAULT_BASE_URL: &str = "https://graph.instagram.com";

/// Platform metric names requested when the caller does not override them.
/// `follower_count` is the platform's name for the canonical `followers`.
pub(crate) const DEFAULT_METRICS: &str = "views,reach,likes,comments,follower_count";

/// Maximum number of recent media objects requested per insight fetch.
pub(crate) const RECENT_MEDIA_LIMIT: u32 = 10;

const MEDIA_FIELDS: &str = "id,caption,timestamp,like_count,comments_count";

/// Client for the Instagram Graph API.
///
/// Holds the HTTP client and base URL; the access token is supplied per call
/// because it is resolved per account at request time. Use
/// [`InstagramClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct InstagramClient {
    client: Client,
    base_url: Url,
}

impl InstagramClient {
    /// Creates a new client pointed at the production Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, InstagramError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InstagramError::Api`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, InstagramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("metricdeck/0.1 (social-insights)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| InstagramError::Api {
            message: format!("invalid base URL '{base_url}': {e}"),
            code: None,
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the account's insight metrics for the daily period.
    ///
    /// Calls `GET me/insights?metric=...&period=day`. `metric_override`
    /// replaces the default metric list when provided (the caller's optional
    /// `metric` request field).
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Api`] if the platform reports an error in-body.
    /// - [`InstagramError::Http`] on network failure or non-2xx status.
    /// - [`InstagramError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_insights(
        &self,
        access_token: &str,
        metric_override: Option<&str>,
    ) -> Result<Vec<InsightMetric>, InstagramError> {
        let metric = metric_override.unwrap_or(DEFAULT_METRICS);
        let url = self.build_url(
            "me/insights",
            access_token,
            &[("metric", metric), ("period", "day")],
        );
        let body = self.request_json(&url).await?;

        let envelope: InsightsResponse =
            serde_json::from_value(body).map_err(|e| InstagramError::Deserialize {
                context: "me/insights".to_string(),
                source: e,
            })?;

        Ok(envelope.data)
    }

    /// Fetches up to [`RECENT_MEDIA_LIMIT`] most recent media objects,
    /// platform ordering preserved.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Api`] if the platform reports an error in-body.
    /// - [`InstagramError::Http`] on network failure or non-2xx status.
    /// - [`InstagramError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_recent_media(
        &self,
        access_token: &str,
    ) -> Result<Vec<MediaItem>, InstagramError> {
        let url = self.build_url(
            "me/media",
            access_token,
            &[
                ("fields", MEDIA_FIELDS),
                ("limit", &RECENT_MEDIA_LIMIT.to_string()),
            ],
        );
        let body = self.request_json(&url).await?;

        let envelope: MediaResponse =
            serde_json::from_value(body).map_err(|e| InstagramError::Deserialize {
                context: "me/media".to_string(),
                source: e,
            })?;

        Ok(envelope.data)
    }

    /// Builds the full request URL with the access token and extra query
    /// parameters, all percent-encoded.
    fn build_url(&self, path: &str, access_token: &str, params: &[(&str, &str)]) -> Url {
        // base_url always ends in '/' and path is relative, so join cannot fail.
        let mut url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("access_token", access_token);
        }
        url
    }

    /// Sends a GET request, inspects the body for the platform's error
    /// object, and parses the body as JSON.
    ///
    /// Platform errors take precedence over HTTP status so the caller sees
    /// the platform's message rather than a bare status failure.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, InstagramError> {
        // The URL carries the access token; log the path only.
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!(path = url.path(), status = %response.status(), "instagram api response");
        let status_error = response.error_for_status_ref().err();
        let text = response.text().await?;

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(body) => {
                Self::check_api_error(&body)?;
                if let Some(e) = status_error {
                    return Err(e.into());
                }
                Ok(body)
            }
            Err(parse_error) => {
                if let Some(e) = status_error {
                    return Err(e.into());
                }
                Err(InstagramError::Deserialize {
                    context: url.path().to_string(),
                    source: parse_error,
                })
            }
        }
    }

    /// Checks for the Graph API error object and converts it into
    /// [`InstagramError::Api`].
    fn check_api_error(body: &serde_json::Value) -> Result<(), InstagramError> {
        if let Some(error) = body.get("error").and_then(serde_json::Value::as_object) {
            let message = error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown platform error")
                .to_string();
            let code = error.get("code").and_then(serde_json::Value::as_i64);
            return Err(InstagramError::Api { message, code });
        }
        Ok(())
    }
}
