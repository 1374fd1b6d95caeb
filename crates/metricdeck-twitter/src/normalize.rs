//! Normalization of Twitter/X API responses into the canonical insight
//! schema. Pure functions: same raw input always yields the same output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Tweet, TwitterUser};

/// Canonical metric keys for this adapter. Every key is always present in
/// the normalized output, zero when the platform did not report it.
pub const CANONICAL_METRICS: [&str; 6] =
    ["followers", "likes", "quotes", "replies", "reposts", "views"];

/// Platform metric names accepted for each canonical key, in lookup order.
/// The first name present in the raw metric set wins.
const METRIC_ALIASES: [(&str, &[&str]); 6] = [
    ("followers", &["followers", "followers_count"]),
    ("likes", &["likes", "like_count"]),
    ("quotes", &["quotes", "quote_count"]),
    ("replies", &["replies", "reply_count"]),
    ("reposts", &["reposts", "retweet_count", "retweets"]),
    ("views", &["views", "impression_count", "impressions"]),
];

/// Canonical per-post projection of a tweet.
///
/// Engagement counters are always serialized (zero when missing upstream);
/// `created_at` is omitted when the platform did not supply it.
#[derive(Debug, Clone, Serialize)]
pub struct TweetSummary {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub like_count: i64,
    pub reply_count: i64,
    pub retweet_count: i64,
    pub quote_count: i64,
}

/// Builds the canonical metric mapping from the account's raw metric set.
///
/// Each canonical key is matched by name against the platform vocabulary
/// (via the alias table) and defaults to `0` when unmatched. A `BTreeMap`
/// keeps key order stable so serialization is deterministic.
#[must_use]
pub fn normalize_user_metrics(user: &TwitterUser) -> BTreeMap<String, i64> {
    let mut metrics = BTreeMap::new();
    for (canonical, aliases) in METRIC_ALIASES {
        let value = aliases
            .iter()
            .find_map(|name| user.public_metrics.get(*name))
            .copied()
            .unwrap_or(0);
        metrics.insert(canonical.to_string(), value);
    }
    metrics
}

/// Projects raw tweets onto the canonical per-post shape, platform ordering
/// preserved.
#[must_use]
pub fn normalize_recent_tweets(tweets: &[Tweet]) -> Vec<TweetSummary> {
    tweets
        .iter()
        .map(|tweet| TweetSummary {
            id: tweet.id.clone(),
            text: tweet.text.clone(),
            created_at: tweet.created_at.clone(),
            like_count: tweet.like_count,
            reply_count: tweet.reply_count,
            retweet_count: tweet.retweet_count,
            quote_count: tweet.quote_count,
        })
        .collect()
}
