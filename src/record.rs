//! The daily APOD record.
//!
//! [`Apod`] is either a record decoded from the API response or the sentinel
//! record substituted for a failed fetch (see [`Apod::error`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::today;
use crate::error::ApodError;

/// Title of the sentinel record produced when a fetch fails.
pub const ERROR_TITLE: &str = "Error! See APOD.explanation";

/// Kind of media referenced by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    /// Interactive or otherwise unclassified entries.
    #[serde(other)]
    Other,
}

/// One day's Astronomy Picture of the Day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apod {
    /// Archive date of the entry (`YYYY-MM-DD` on the wire).
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    /// `None` only on the sentinel record.
    #[serde(default)]
    pub media_type: Option<MediaType>,
    /// Standard-resolution media URL.
    pub url: String,
    /// High-resolution image URL. Never meaningful for video.
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    /// Set only on the sentinel record; omitted from serialized real entries.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    failed: bool,
}

impl Apod {
    /// Builds the sentinel record for a failed fetch.
    ///
    /// The title is [`ERROR_TITLE`], the explanation carries `message`, and
    /// the date is the local date at the moment of failure. All other fields
    /// are empty.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            date: today(),
            title: ERROR_TITLE.to_string(),
            explanation: message.into(),
            media_type: None,
            url: String::new(),
            hdurl: None,
            copyright: None,
            failed: true,
        }
    }

    /// Builds the sentinel record from a transport or decode error.
    #[must_use]
    pub fn from_error(error: &ApodError) -> Self {
        Self::error(error.to_string())
    }

    /// Whether this is the sentinel record of a failed fetch.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.failed
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.media_type == Some(MediaType::Video)
    }

    /// Selects the media URL.
    ///
    /// Returns `hdurl` when `hd` is requested, the entry is not a video, and
    /// an HD URL is present; `url` otherwise.
    #[must_use]
    pub fn media_url(&self, hd: bool) -> &str {
        match &self.hdurl {
            Some(hdurl) if hd && !self.is_video() => hdurl,
            _ => &self.url,
        }
    }
}
