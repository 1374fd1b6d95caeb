//! Twitter/X insight adapter: API client, response types, and normalization
//! into the canonical insight schema.

mod client;
mod error;
mod normalize;
mod types;

pub use client::TwitterClient;
pub use error::TwitterError;
pub use normalize::{
    normalize_recent_tweets, normalize_user_metrics, TweetSummary, CANONICAL_METRICS,
};
pub use types::{Tweet, TwitterUser};
