//! Saving a day's media to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use apod_core::date::DATE_FORMAT;
use apod_core::{Apod, ApodError, Transport};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

const DEFAULT_EXTENSION: &str = "jpg";

/// What happened when asked to save a record's media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SaveOutcome {
    /// The file was written.
    Saved { path: PathBuf, bytes: u64 },
    /// Videos are linked, not downloaded.
    Video { url: String },
    /// The record is the error sentinel; there is nothing to fetch.
    Unavailable { explanation: String },
}

/// File name for a day's media: `apod_<date>[_hd].<ext>`.
pub(crate) fn media_filename(date: NaiveDate, url: &str, hd: bool) -> String {
    let extension = media_extension(url).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let suffix = if hd { "_hd" } else { "" };
    format!("apod_{}{suffix}.{extension}", date.format(DATE_FORMAT))
}

fn media_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last_segment = parsed.path_segments()?.next_back()?;
    let (_, extension) = last_segment.rsplit_once('.')?;
    if extension.is_empty()
        || extension.len() > 5
        || !extension.chars().all(|ch| ch.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

fn download_spinner(enabled: bool, message: String) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Downloads the record's standard or HD media into `output_dir`.
pub(crate) async fn save_media(
    transport: &Transport,
    apod: &Apod,
    hd: bool,
    output_dir: &Path,
    use_spinner: bool,
) -> Result<SaveOutcome, ApodError> {
    if apod.is_error() {
        return Ok(SaveOutcome::Unavailable {
            explanation: apod.explanation.clone(),
        });
    }
    let url = apod.media_url(hd);
    if apod.is_video() {
        return Ok(SaveOutcome::Video {
            url: url.to_string(),
        });
    }

    let filename = media_filename(apod.date, url, hd);
    let path = output_dir.join(&filename);
    let spinner = download_spinner(use_spinner, format!("Downloading {filename}..."));
    let result = transport.download_to_file(url, &path).await;
    spinner.finish_and_clear();

    let bytes = result?;
    Ok(SaveOutcome::Saved { path, bytes })
}
