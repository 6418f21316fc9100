//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use apod_core::date::DATE_FORMAT;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// Browse and download NASA's Astronomy Picture of the Day.
///
/// Without --download, shows an interactive menu to download the standard or
/// HD image and step to the previous or next day.
#[derive(Parser, Debug)]
#[command(name = "apod")]
#[command(author, version, about)]
pub struct Args {
    /// NASA API key (falls back to the config file, then DEMO_KEY)
    #[arg(short = 'k', long, env = "APOD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Date to start from (YYYY-MM-DD); defaults to today
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Directory to save images into (defaults to the current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Download once at the given quality and exit instead of showing the menu
    #[arg(long, value_enum)]
    pub download: Option<Quality>,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// HTTP read timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,

    /// Override the API endpoint
    #[arg(long, env = "APOD_BASE_URL", hide = true)]
    pub base_url: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Image quality to download.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Standard,
    Hd,
}

impl Quality {
    pub fn is_hd(self) -> bool {
        self == Self::Hd
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD, got '{value}': {e}"))
}
