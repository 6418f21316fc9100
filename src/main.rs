//! CLI entry point for the APOD console demo.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result, bail};
use apod_core::{ApodClient, Transport};
use clap::Parser;
use tracing::{debug, info};

mod app_config;
mod cli;
mod media;
mod menu;
mod terminal;

use cli::Args;
use media::{SaveOutcome, save_media};
use menu::MenuOptions;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    terminal::init_tracing(terminal::default_log_level(&args));

    let loaded = app_config::load_default_file_config()?;
    match (&loaded.path, &loaded.config) {
        (Some(path), Some(_)) => debug!(path = %path.display(), "Loaded config file"),
        (Some(path), None) => debug!(path = %path.display(), "No config file found"),
        (None, _) => debug!("No config directory available"),
    }
    let settings = app_config::resolve_settings(&args, loaded.config.as_ref());

    let transport =
        Transport::with_timeouts(settings.connect_timeout_secs, settings.read_timeout_secs);
    let mut client = match args.date {
        Some(date) => ApodClient::with_date(settings.api_key.clone(), date),
        None => ApodClient::new(settings.api_key.clone()),
    }
    .with_transport(transport);
    if let Some(base_url) = &args.base_url {
        client = client.with_base_url(base_url.clone());
    }
    debug!(?client, output_dir = %settings.output_dir.display(), "Client configured");

    let use_spinner = terminal::should_use_spinner(
        io::stderr().is_terminal(),
        args.quiet,
        terminal::is_dumb_terminal(),
    );

    if let Some(quality) = args.download {
        let apod = client.fetch().await.clone();
        let mut stdout = io::stdout().lock();
        menu::write_record(&mut stdout, &apod)?;
        let outcome = save_media(
            client.transport(),
            &apod,
            quality.is_hd(),
            &settings.output_dir,
            use_spinner,
        )
        .await
        .context("Download failed")?;
        if let SaveOutcome::Unavailable { explanation } = &outcome {
            bail!("APOD request failed: {explanation}");
        }
        menu::write_outcome(&mut stdout, &outcome)?;
        return Ok(());
    }

    info!("Starting interactive menu");
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    menu::run_menu(
        &mut client,
        MenuOptions {
            output_dir: &settings.output_dir,
            use_spinner,
        },
        &mut input,
        &mut output,
    )
    .await
}
