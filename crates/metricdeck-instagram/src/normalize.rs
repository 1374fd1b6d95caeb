//! Normalization of Instagram Graph API responses into the canonical
//! insight schema. Pure functions: same raw input always yields the same
//! output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{InsightMetric, MediaItem};

/// Canonical metric keys for this adapter. Every key is always present in
/// the normalized output, zero when the platform did not report it.
pub const CANONICAL_METRICS: [&str; 5] = ["comments", "followers", "likes", "reach", "views"];

/// Platform metric names accepted for each canonical key, in lookup order.
const METRIC_ALIASES: [(&str, &[&str]); 5] = [
    ("comments", &["comments", "comments_count"]),
    ("followers", &["followers", "follower_count"]),
    ("likes", &["likes", "like_count"]),
    ("reach", &["reach"]),
    ("views", &["views", "impressions"]),
];

/// Canonical per-post projection of a media object.
///
/// Engagement counters are always serialized (zero when missing upstream);
/// `text` (the caption) and `timestamp` are omitted when absent.
#[derive(Debug, Clone, Serialize)]
pub struct MediaSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub like_count: i64,
    pub comments_count: i64,
}

/// Builds the canonical metric mapping from the raw insight list.
///
/// Each canonical key is matched by name against the reported metrics; when
/// a metric carries multiple time-bucketed values the first is taken, and
/// unmatched keys default to `0`. A `BTreeMap` keeps key order stable so
/// serialization is deterministic.
#[must_use]
pub fn normalize_insight_metrics(raw: &[InsightMetric]) -> BTreeMap<String, i64> {
    let mut metrics = BTreeMap::new();
    for (canonical, aliases) in METRIC_ALIASES {
        let value = aliases
            .iter()
            .find_map(|name| raw.iter().find(|m| m.name == *name))
            .and_then(|m| m.values.first())
            .and_then(|v| v.value)
            .unwrap_or(0);
        metrics.insert(canonical.to_string(), value);
    }
    metrics
}

/// Projects raw media objects onto the canonical per-post shape, platform
/// ordering preserved.
#[must_use]
pub fn normalize_recent_media(media: &[MediaItem]) -> Vec<MediaSummary> {
    media
        .iter()
        .map(|item| MediaSummary {
            id: item.id.clone(),
            text: item.caption.clone(),
            timestamp: item.timestamp.clone(),
            like_count: item.like_count,
            comments_count: item.comments_count,
        })
        .collect()
}
