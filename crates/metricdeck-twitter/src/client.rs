//! HTTP client for the Twitter/X v2 API.
//!
//! Wraps `reqwest` with the adapter's credential scheme (bearer header),
//! bounded timeouts, and platform-error detection. The platform reports
//! semantic errors in the response body (`"errors"` array or `"error"`
//! object), not necessarily via HTTP status, so every response body is
//! inspected before deserialization.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::TwitterError;
use crate::types::{Tweet, TweetsResponse, TwitterUser, UserLookupResponse};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// Maximum number of recent tweets requested per insight fetch.
pub(crate) const RECENT_TWEETS_LIMIT: u32 = 10;

/// Client for the Twitter/X v2 API.
///
/// Holds the HTTP client and base URL; the access token is supplied per call
/// because it is resolved per account at request time. Use
/// [`TwitterClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: Client,
    base_url: Url,
}

impl TwitterClient {
    /// Creates a new client pointed at the production Twitter API.
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, TwitterError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TwitterError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, TwitterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("metricdeck/0.1 (social-insights)")
            .build()?;

        // Normalise: a trailing slash makes Url::join treat the base as a
        // directory instead of replacing its last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TwitterError::Api {
            message: format!("invalid base URL '{base_url}': {e}"),
            code: None,
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the authenticated account and its aggregate metrics snapshot.
    ///
    /// Calls `GET 2/users/me?user.fields=public_metrics`.
    ///
    /// # Errors
    ///
    /// - [`TwitterError::Api`] if the platform reports an error in-body.
    /// - [`TwitterError::Http`] on network failure or non-2xx status.
    /// - [`TwitterError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_authed_user(&self, access_token: &str) -> Result<TwitterUser, TwitterError> {
        let url = self.build_url("2/users/me", &[("user.fields", "public_metrics")]);
        let body = self.request_json(&url, access_token).await?;

        let envelope: UserLookupResponse =
            serde_json::from_value(body).map_err(|e| TwitterError::Deserialize {
                context: "2/users/me".to_string(),
                source: e,
            })?;

        Ok(envelope.data)
    }

    /// Fetches up to [`RECENT_TWEETS_LIMIT`] most recent tweets for a user,
    /// platform ordering preserved.
    ///
    /// # Errors
    ///
    /// - [`TwitterError::Api`] if the platform reports an error in-body.
    /// - [`TwitterError::Http`] on network failure or non-2xx status.
    /// - [`TwitterError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_recent_tweets(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Vec<Tweet>, TwitterError> {
        let path = format!("2/users/{user_id}/tweets");
        let url = self.build_url(
            &path,
            &[
                ("max_results", &RECENT_TWEETS_LIMIT.to_string()),
                (
                    "tweet.fields",
                    "created_at,like_count,reply_count,retweet_count,quote_count",
                ),
            ],
        );
        let body = self.request_json(&url, access_token).await?;

        let envelope: TweetsResponse =
            serde_json::from_value(body).map_err(|e| TwitterError::Deserialize {
                context: format!("2/users/{user_id}/tweets"),
                source: e,
            })?;

        Ok(envelope.data)
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Url {
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
        }
        url
    }

    /// Sends a bearer-authenticated GET, inspects the body for a platform
    /// error indicator, and parses the body as JSON.
    ///
    /// Platform errors take precedence over HTTP status: a 401 carrying
    /// `{"error": {...}}` surfaces as [`TwitterError::Api`] with the
    /// platform's message, not as a bare status failure.
    async fn request_json(
        &self,
        url: &Url,
        access_token: &str,
    ) -> Result<serde_json::Value, TwitterError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(access_token)
            .send()
            .await?;
        tracing::debug!(path = url.path(), status = %response.status(), "twitter api response");
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
                Err(TwitterError::Deserialize {
                    context: url.to_string(),
                    source: parse_error,
                })
            }
        }
    }

    /// Checks for the platform's in-body error indicators and converts the
    /// first one found into [`TwitterError::Api`].
    fn check_api_error(body: &serde_json::Value) -> Result<(), TwitterError> {
        if let Some(first) = body
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .and_then(|errs| errs.first())
        {
            let message = first
                .get("message")
                .or_else(|| first.get("detail"))
                .or_else(|| first.get("title"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown platform error")
                .to_string();
            let code = first.get("code").and_then(serde_json::Value::as_i64);
            return Err(TwitterError::Api { message, code });
        }

        if let Some(error) = body.get("error").and_then(serde_json::Value::as_object) {
            let message = error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown platform error")
                .to_string();
            let code = error.get("code").and_then(serde_json::Value::as_i64);
            return Err(TwitterError::Api { message, code });
        }

        Ok(())
    }
}
