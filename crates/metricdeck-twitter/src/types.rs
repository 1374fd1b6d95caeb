//! Twitter/X API response types.
//!
//! Only the fields the adapter requests are modeled; everything else in the
//! platform payload is ignored by serde. Engagement counters default to zero
//! when omitted so downstream normalization never sees an absent number.

use std::collections::HashMap;

use serde::Deserialize;

/// Wrapper for the authenticated-user lookup: `{ "data": { ... } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserLookupResponse {
    pub data: TwitterUser,
}

/// The authenticated account with its aggregate metrics snapshot.
///
/// `public_metrics` is kept as a name→value map rather than a fixed struct:
/// the platform's metric vocabulary is what normalization maps onto the
/// canonical keys, and unknown names must survive deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub public_metrics: HashMap<String, i64>,
}

/// Wrapper for the recent-tweets timeline: `{ "data": [ ... ] }`.
///
/// `data` is absent entirely when the account has no tweets.
#[derive(Debug, Deserialize)]
pub(crate) struct TweetsResponse {
    #[serde(default)]
    pub data: Vec<Tweet>,
}

/// A single tweet with the per-post fields the adapter requests.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub reply_count: i64,
    #[serde(default)]
    pub retweet_count: i64,
    #[serde(default)]
    pub quote_count: i64,
}
