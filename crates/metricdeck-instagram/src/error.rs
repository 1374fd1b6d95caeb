use thiserror::Error;

/// Errors returned by the Instagram Graph API client.
#[derive(Debug, Error)]
pub enum InstagramError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform reported an error in the response body
    /// (`{"error": {"message", "code"}}`).
    #[error("Instagram API error: {message}")]
    Api { message: String, code: Option<i64> },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
