use thiserror::Error;

/// Errors returned by the storefront HTTP client.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The storefront answered with `"success": false` or an `"error"` field.
    #[error("storefront error: {0}")]
    Api(String),

    /// Non-2xx response without a readable JSON error body.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// A mutating request was attempted before any CSRF token was known.
    #[error("no CSRF token available for {endpoint}")]
    MissingCsrfToken { endpoint: String },
}

impl StorefrontError {
    /// Text suitable for an inline notice next to the affected control.
    ///
    /// Server-provided messages are shown as-is; everything else collapses
    /// to a generic line so transport details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Api(msg) => msg.clone(),
            _ => "Something went wrong, please try again.".to_owned(),
        }
    }
}
