//! HTTP transport for the APOD API.
//!
//! [`Transport`] performs the GET with the standard header set, decodes the
//! JSON body into an [`Apod`], and maps any failure onto the sentinel record
//! for callers that must never see an error. It also streams media files to
//! disk for the console program.
//!
//! # Headers
//!
//! Every API request carries, set explicitly per request:
//! - `Accept: application/json`
//! - `User-Agent: apod-client/<version> (...)`
//! - `Cache-Control: max-age=604800, max-stale` (advisory only; nothing is cached locally)

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL, USER_AGENT};
use serde_json::Value;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApodError, redact_api_key};
use crate::record::Apod;
use crate::user_agent;

/// Default HTTP connect timeout.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout.
pub const READ_TIMEOUT_SECS: u64 = 30;

/// Cache hint sent with API requests: seven days, stale responses allowed.
pub const CACHE_CONTROL_HINT: &str = "max-age=604800, max-stale";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Shared HTTP client for API calls and media downloads.
///
/// Create once and reuse; the underlying reqwest client pools connections.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    user_agent: String,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    /// Creates a transport with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 10 seconds
    /// - Read timeout: 30 seconds
    /// - gzip and deflate decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a transport with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let user_agent = user_agent::default_user_agent();
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .deflate(true)
            .user_agent(user_agent.clone())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client, user_agent }
    }

    /// Fetches and decodes the record at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApodError`] if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns a non-success status
    /// - The body is not a valid APOD record
    #[tracing::instrument(skip_all, fields(url = %redact_api_key(url)))]
    pub async fn get_apod(&self, url: &str) -> Result<Apod, ApodError> {
        Url::parse(url).map_err(|_| ApodError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(USER_AGENT, &self.user_agent)
            .header(CACHE_CONTROL, CACHE_CONTROL_HINT)
            .send()
            .await
            .map_err(|e| ApodError::from_reqwest(url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApodError::from_reqwest(url, e))?;

        if !status.is_success() {
            let message = service_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            debug!(status = status.as_u16(), %message, "APOD API error");
            return Err(ApodError::http_status(url, status.as_u16(), message));
        }

        serde_json::from_str::<Apod>(&body).map_err(|e| ApodError::decode(url, e))
    }

    /// Fetches the record at `url`, substituting the sentinel record on failure.
    ///
    /// Never fails: transport and decode errors are logged and returned as
    /// [`Apod::error`] records.
    pub async fn fetch_record(&self, url: &str) -> Apod {
        match self.get_apod(url).await {
            Ok(apod) => {
                debug!(date = %apod.date, title = %apod.title, "APOD record decoded");
                apod
            }
            Err(error) => {
                warn!(error = %error, "APOD fetch failed");
                Apod::from_error(&error)
            }
        }
    }

    /// Streams the media at `url` into the file at `path`, returning bytes written.
    ///
    /// An existing file at `path` is overwritten. A partially written file is
    /// removed when the transfer fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApodError`] for invalid URLs, network failures, non-success
    /// statuses, and file system errors.
    #[tracing::instrument(skip_all, fields(url = %url, path = %path.display()))]
    pub async fn download_to_file(&self, url: &str, path: &Path) -> Result<u64, ApodError> {
        Url::parse(url).map_err(|_| ApodError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| ApodError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApodError::http_status(
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed"),
            ));
        }

        let mut file = File::create(path)
            .await
            .map_err(|e| ApodError::io(path, e))?;

        let stream_result = stream_to_file(&mut file, response, url, path).await;
        if stream_result.is_err() {
            debug!(path = %path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(path).await;
        }
        let bytes_written = stream_result?;

        info!(path = %path.display(), bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, ApodError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| ApodError::from_reqwest(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| ApodError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| ApodError::io(file_path, e))?;

    Ok(bytes_written)
}

/// Extracts the service's own message from an error body.
///
/// api.nasa.gov gateway errors look like `{"error":{"code":..,"message":..}}`;
/// APOD validation errors look like `{"code":400,"msg":..}`.
fn service_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .or_else(|| value.pointer("/msg"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}
