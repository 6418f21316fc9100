//! `ApodClient` - configuration, request URL, fetch and media accessors.
//!
//! # Design
//! The client owns the API key, the target date, and the last fetched
//! record. Every fetch is an independent request that replaces the record
//! wholesale; failures are stored as the sentinel record rather than
//! returned as errors.
//!
//! All mutating operations take `&mut self`. Sharing one client between
//! tasks requires external synchronization (e.g. a `tokio::sync::Mutex`);
//! without it, concurrent fetches would race on the stored record.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::date::{DATE_FORMAT, clamp_date, today};
use crate::error::redact_api_key;
use crate::record::Apod;
use crate::transport::Transport;

/// Default APOD API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Client for the APOD API.
///
/// # Example
///
/// ```no_run
/// use apod_core::ApodClient;
/// use chrono::NaiveDate;
///
/// # async fn example() {
/// let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let mut client = ApodClient::with_date("DEMO_KEY", date);
/// let hd_url = client.media_url(true).await.to_string();
/// let yesterday_url = client.previous_media_url(false).await.to_string();
/// # }
/// ```
#[derive(Clone)]
pub struct ApodClient {
    api_key: String,
    date: NaiveDate,
    base_url: String,
    transport: Transport,
    apod: Option<Apod>,
}

impl std::fmt::Debug for ApodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApodClient")
            .field("date", &self.date)
            .field("base_url", &self.base_url)
            .field("apod", &self.apod)
            .finish_non_exhaustive()
    }
}

impl ApodClient {
    /// Creates a client for today's entry.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_date(api_key, today())
    }

    /// Creates a client for `date`, clamped to the archive range.
    pub fn with_date(api_key: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            api_key: api_key.into(),
            date: clamp_date(date, today()),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: Transport::new(),
            apod: None,
        }
    }

    /// Replaces the transport, e.g. one built with custom timeouts.
    #[must_use]
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Replaces the API endpoint (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the target date, clamped to `[MIN_DATE, today]`. No I/O.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = clamp_date(date, today());
    }

    /// Sets the API key. Not validated; a bad key surfaces as a failed fetch.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// The current (clamped) target date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The record stored by the last fetch, if any.
    #[must_use]
    pub fn apod(&self) -> Option<&Apod> {
        self.apod.as_ref()
    }

    /// The transport used for API calls, reusable for media downloads.
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Builds `base?api_key=<key>&date=<YYYY-MM-DD>` for the current date.
    #[must_use]
    pub fn request_url(&self) -> String {
        format!(
            "{}?api_key={}&date={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            self.date.format(DATE_FORMAT)
        )
    }

    /// Requests the entry for the current date and stores the result.
    ///
    /// Never fails: on any transport or decode error the stored record is the
    /// sentinel record (see [`Apod::error`]), which callers detect with
    /// [`Apod::is_error`].
    pub async fn fetch(&mut self) -> &Apod {
        let url = self.request_url();
        debug!(url = %redact_api_key(&url), "requesting APOD entry");
        let apod = self.transport.fetch_record(&url).await;
        self.apod.insert(apod)
    }

    /// Fetches the current date and returns its media URL.
    ///
    /// With `hd`, returns the HD URL when the entry is not a video and has
    /// one; otherwise the standard URL. Always performs a request.
    pub async fn media_url(&mut self, hd: bool) -> &str {
        self.fetch().await.media_url(hd)
    }

    /// Sets the date (clamped), then behaves as [`media_url`](Self::media_url).
    pub async fn media_url_for(&mut self, date: NaiveDate, hd: bool) -> &str {
        self.set_date(date);
        self.media_url(hd).await
    }

    /// Moves the date back one day from the current date and fetches it.
    ///
    /// Repeated calls compound from the last stored date.
    pub async fn previous_media_url(&mut self, hd: bool) -> &str {
        let date = self
            .date
            .checked_sub_days(Days::new(1))
            .unwrap_or(self.date);
        self.media_url_for(date, hd).await
    }

    /// Moves the date forward one day from the current date and fetches it.
    ///
    /// Repeated calls compound from the last stored date.
    pub async fn next_media_url(&mut self, hd: bool) -> &str {
        let date = self
            .date
            .checked_add_days(Days::new(1))
            .unwrap_or(self.date);
        self.media_url_for(date, hd).await
    }
}
