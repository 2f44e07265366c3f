//! Crate-wide error type.
//!
//! DESIGN
//! ======
//! Every fallible helper returns [`Result`]. Variants are grouped by
//! [`ErrorKind`] so callers can branch on "bad input" vs "the browser is
//! missing something" vs "gave up waiting" without matching every variant.

use std::time::Duration;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something unusable.
    Input,
    /// A capability the helper relies on is missing or failed.
    Environment,
    /// A bounded wait ran out of time.
    Timeout,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: &'static str },
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },
    #[error("malformed percent-encoding in `{0}`")]
    MalformedEncoding(String),
    #[error("cookie expiry of {0}s is out of range")]
    InvalidExpiry(i64),
    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{0} is not available")]
    Unavailable(&'static str),
    #[error("dom operation failed: {0}")]
    Dom(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("condition not met within {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSelector { .. }
            | Self::InvalidRange { .. }
            | Self::MalformedEncoding(_)
            | Self::InvalidExpiry(_)
            | Self::InvalidUrl { .. } => ErrorKind::Input,
            Self::Unavailable(_) | Self::Dom(_) | Self::Http(_) => ErrorKind::Environment,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }

    pub(crate) fn invalid_selector(selector: &str, reason: &'static str) -> Self {
        Self::InvalidSelector { selector: selector.to_owned(), reason }
    }
}
