//! Failure kinds of the content pipeline.
//!
//! A missing article is not an error: lookups return `Ok(None)` and the HTTP
//! layer turns that into a plain 404.

/// Errors surfaced by the content client and everything composed over it.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No usable API credential, or the client could not be built.
    #[error("content API configuration error: {message}")]
    Config {
        /// What is missing or invalid.
        message: String,
    },

    /// Network, HTTP-status or decode failure talking to the content API.
    #[error("content API upstream error: {message}")]
    Upstream {
        /// Which call failed and how.
        message: String,
        /// Underlying transport error, if any.
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl ContentError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an upstream error without a transport source.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream {
            message: msg.into(),
            source: None,
        }
    }

    /// Wrap a transport error with the call it came from.
    ///
    /// The request URL is stripped from `source`: it carries the API key.
    pub fn transport(msg: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Upstream {
            message: msg.into(),
            source: Some(source.without_url()),
        }
    }
}

/// Convenience alias for content pipeline results.
pub type Result<T> = std::result::Result<T, ContentError>;
