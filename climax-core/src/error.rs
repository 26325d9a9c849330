use thiserror::Error;

/// Text shown when the provider rejects a lookup without a readable reason.
pub const FALLBACK_HTTP_MESSAGE: &str = "Unable to fetch weather data";

/// Everything that can go wrong during a single lookup attempt.
///
/// The `Display` output is what ends up in `LookupState::Failure`, so the
/// transport and parse variants keep their details out of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The query was blank after trimming.
    #[error("query is empty")]
    EmptyQuery,

    /// The provider answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// No response was received (DNS, refused connection, timeout).
    #[error("network error")]
    Network { detail: String },

    /// The response body did not match the configured shape.
    #[error("unexpected response from weather service")]
    Parse { detail: String },

    /// The fetch task died before producing an outcome.
    #[error("weather lookup aborted")]
    Aborted,
}

impl LookupError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network {
            detail: err.to_string(),
        }
    }

    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse {
            detail: err.to_string(),
        }
    }
}
