//! Interactive console menu.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use apod_core::date::DATE_FORMAT;
use apod_core::{Apod, ApodClient};
use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::media::{SaveOutcome, save_media};

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Standard,
    Hd,
    Previous,
    Next,
    Quit,
}

impl MenuChoice {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Standard),
            "2" => Some(Self::Hd),
            "3" => Some(Self::Previous),
            "4" => Some(Self::Next),
            "0" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Menu output settings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MenuOptions<'a> {
    pub output_dir: &'a Path,
    pub use_spinner: bool,
}

/// Prints the heading for one record.
pub(crate) fn write_record<W: Write>(out: &mut W, apod: &Apod) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Title: {}", apod.title)?;
    writeln!(out, "Date:  {}", apod.date.format(DATE_FORMAT))?;
    if apod.is_error() {
        writeln!(out, "{}", apod.explanation)?;
    } else if let Some(copyright) = &apod.copyright {
        writeln!(out, "Copyright: {}", copyright.trim())?;
    }
    Ok(())
}

/// Reports a save outcome to the user.
pub(crate) fn write_outcome<W: Write>(out: &mut W, outcome: &SaveOutcome) -> std::io::Result<()> {
    match outcome {
        SaveOutcome::Saved { path, bytes } => {
            writeln!(out, "Saved {} ({bytes} bytes)", path.display())
        }
        SaveOutcome::Video { url } => {
            writeln!(out, "Today's entry is a video, not downloaded: {url}")
        }
        SaveOutcome::Unavailable { .. } => {
            writeln!(out, "Nothing to download for this entry.")
        }
    }
}

fn write_choices<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "[1] Standard")?;
    writeln!(out, "[2] HD")?;
    writeln!(out, "[3] Previous Day")?;
    writeln!(out, "[4] Next Day")?;
    writeln!(out, "[0] Quit")?;
    write!(out, "Selection: ")?;
    out.flush()
}

/// Date to step from: the displayed entry, or the requested date when the
/// fetch failed and the sentinel carries today's date instead.
fn anchor_date(client: &ApodClient, apod: &Apod) -> NaiveDate {
    if apod.is_error() {
        client.date()
    } else {
        apod.date
    }
}

/// Runs the menu until the user quits or input ends.
///
/// Every iteration fetches the client's current date, so a failed request is
/// retried simply by picking an entry again.
pub(crate) async fn run_menu<R, W>(
    client: &mut ApodClient,
    options: MenuOptions<'_>,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        let apod = client.fetch().await.clone();
        write_record(out, &apod)?;
        write_choices(out)?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read menu selection")?;
        if read == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let choice = MenuChoice::parse(&line);
        debug!(?choice, "menu selection");
        match choice {
            Some(MenuChoice::Quit) => return Ok(()),
            Some(MenuChoice::Standard) => download(client, &apod, false, options, out).await?,
            Some(MenuChoice::Hd) => download(client, &apod, true, options, out).await?,
            Some(MenuChoice::Previous) => {
                let from = anchor_date(client, &apod);
                client.set_date(from.checked_sub_days(Days::new(1)).unwrap_or(from));
            }
            Some(MenuChoice::Next) => {
                let from = anchor_date(client, &apod);
                client.set_date(from.checked_add_days(Days::new(1)).unwrap_or(from));
            }
            None => writeln!(out, "Invalid selection.")?,
        }
    }
}

async fn download<W: Write>(
    client: &ApodClient,
    apod: &Apod,
    hd: bool,
    options: MenuOptions<'_>,
    out: &mut W,
) -> Result<()> {
    let quality = if hd { "HD" } else { "standard" };
    writeln!(out, "Downloading {quality} image...")?;
    match save_media(
        client.transport(),
        apod,
        hd,
        options.output_dir,
        options.use_spinner,
    )
    .await
    {
        Ok(outcome) => write_outcome(out, &outcome)?,
        Err(error) => writeln!(out, "Download failed: {error}")?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parse_accepts_digits_with_whitespace() {
        assert_eq!(MenuChoice::parse("1\n"), Some(MenuChoice::Standard));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::Hd));
        assert_eq!(MenuChoice::parse("3\r\n"), Some(MenuChoice::Previous));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Next));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Quit));
    }

    #[test]
    fn test_menu_choice_parse_rejects_other_input() {
        for input in ["", "5", "10", "q", "one", "-1"] {
            assert_eq!(MenuChoice::parse(input), None, "{input:?}");
        }
    }

    #[test]
    fn test_write_record_shows_explanation_for_error_record() {
        let apod = Apod::error("HTTP 403 requesting x: API_KEY_INVALID");
        let mut out = Vec::new();
        write_record(&mut out, &apod).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Title: Error! See APOD.explanation"));
        assert!(text.contains("API_KEY_INVALID"));
    }

    #[test]
    fn test_write_outcome_messages() {
        let mut out = Vec::new();
        write_outcome(
            &mut out,
            &SaveOutcome::Video {
                url: "https://youtube.com/embed/x".to_string(),
            },
        )
        .unwrap();
        write_outcome(
            &mut out,
            &SaveOutcome::Saved {
                path: "apod_2020-01-01.jpg".into(),
                bytes: 12,
            },
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("video, not downloaded: https://youtube.com/embed/x"));
        assert!(text.contains("Saved apod_2020-01-01.jpg (12 bytes)"));
    }

    #[test]
    fn test_anchor_date_uses_client_date_after_failure() {
        let requested = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let client = ApodClient::with_date("DEMO_KEY", requested);
        let failed = Apod::error("boom");
        assert_eq!(anchor_date(&client, &failed), requested);
    }
}
