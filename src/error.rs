//! Error types for APOD requests and media downloads.
//!
//! Every URL stored in an error has its `api_key` query value redacted, so
//! error messages can be logged or shown to the user as-is.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the APOD API or downloading media.
#[derive(Debug, Error)]
pub enum ApodError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {}", source_chain(.source))]
    Network {
        /// The request URL (key redacted).
        url: String,
        /// The underlying network error, stripped of its URL.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The request URL (key redacted).
        url: String,
    },

    /// Non-success HTTP response.
    #[error("HTTP {status} requesting {url}: {message}")]
    HttpStatus {
        /// The request URL (key redacted).
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The service's error message, or the canonical reason phrase.
        message: String,
    },

    /// The response body was not a valid APOD record.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        /// The request URL (key redacted).
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// File system error while saving a media file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The URL is malformed or empty.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string (key redacted).
        url: String,
    },
}

impl ApodError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: redact_api_key(url),
            source: source.without_url(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: &str) -> Self {
        Self::Timeout {
            url: redact_api_key(url),
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: &str, status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            url: redact_api_key(url),
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(url: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            url: redact_api_key(url),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: &str) -> Self {
        Self::InvalidUrl {
            url: redact_api_key(url),
        }
    }

    /// Classifies a reqwest send/body error as timeout or network failure.
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::network(url, source)
        }
    }
}

/// Replaces every `api_key` query value with `***`.
#[must_use]
pub(crate) fn redact_api_key(url: &str) -> String {
    const PARAM: &str = "api_key=";

    let mut redacted = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(start) = find_query_param(rest, PARAM) {
        let value_start = start + PARAM.len();
        let value_end = rest[value_start..]
            .find(['&', '#'])
            .map_or(rest.len(), |offset| value_start + offset);
        redacted.push_str(&rest[..value_start]);
        redacted.push_str("***");
        rest = &rest[value_end..];
    }
    redacted.push_str(rest);
    redacted
}

/// Offset of `param` where it starts a query pair (right after `?` or `&`).
fn find_query_param(haystack: &str, param: &str) -> Option<usize> {
    haystack
        .match_indices(param)
        .map(|(index, _)| index)
        .find(|&index| index > 0 && matches!(haystack.as_bytes()[index - 1], b'?' | b'&'))
}

/// Display of a reqwest error followed by its distinct underlying causes.
fn source_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut cause = std::error::Error::source(error);
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}
