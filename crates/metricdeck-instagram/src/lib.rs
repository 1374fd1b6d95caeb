//! Instagram Graph insight adapter: API client, response types, and
//! normalization into the canonical insight schema.

mod client;
mod error;
mod normalize;
mod types;

pub use client::InstagramClient;
pub use error::InstagramError;
pub use normalize::{
    normalize_insight_metrics, normalize_recent_media, MediaSummary, CANONICAL_METRICS,
};
pub use types::{InsightMetric, MediaItem};
