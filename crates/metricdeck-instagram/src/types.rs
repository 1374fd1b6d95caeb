//! Instagram Graph API response types.

use serde::Deserialize;

/// Wrapper for the account-insights response: `{ "data": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct InsightsResponse {
    #[serde(default)]
    pub data: Vec<InsightMetric>,
}

/// One reported metric with its time-bucketed values.
///
/// The adapter requests a single-period aggregate; when the platform still
/// returns multiple buckets, normalization takes the first and does not
/// attempt to interpret the windowing.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightMetric {
    pub name: String,
    #[serde(default)]
    pub values: Vec<InsightValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightValue {
    #[serde(default)]
    pub value: Option<i64>,
}

/// Wrapper for the recent-media response: `{ "data": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct MediaResponse {
    #[serde(default)]
    pub data: Vec<MediaItem>,
}

/// A single media object with the per-post fields the adapter requests.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comments_count: i64,
}
