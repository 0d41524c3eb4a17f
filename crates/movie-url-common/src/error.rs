//! Error type shared by the extractor, the provider adapters and the batch
//! driver.
//!
//! Variants are grouped by how a run reacts to them, but this crate does not
//! make that decision: the batch driver classifies each error it receives.

/// Common error type for movie-url-parser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input line does not reference a supported catalog entry.
    #[error("Not parsed: {0}")]
    UnparsedLine(String),

    /// The provider answered with a non-success HTTP status.
    #[error("Provider returned HTTP {status}")]
    Http { status: u16 },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body is not a usable movie object.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A field the provider schema requires is missing from the response.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The access token is an empty string, so no request was sent.
    #[error("Access token is empty")]
    EmptyToken,

    /// The access token environment variable is not set at all.
    #[error("Access token variable {0} is not set")]
    MissingToken(String),

    /// Too many fetches failed in a row; the run stops.
    #[error("Aborted after {failures} consecutive failures (limit {limit})")]
    FailureThresholdExceeded { failures: u32, limit: u32 },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing a record to the output sink failed.
    #[error("Output error: {0}")]
    Output(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new MalformedResponse error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a new MissingField error.
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new Output error.
    pub fn output<S: Into<String>>(msg: S) -> Self {
        Self::Output(msg.into())
    }

    /// Returns `true` for errors raised while fetching or normalizing a
    /// single record.
    pub fn is_record_failure(&self) -> bool {
        matches!(
            self,
            Self::Http { .. }
                | Self::Transport(_)
                | Self::MalformedResponse(_)
                | Self::MissingField(_)
                | Self::EmptyToken
        )
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
