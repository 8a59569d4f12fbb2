//! Binary entrypoint for the photo gallery.
//!
//! Wires the gallery component to a text renderer and a stdin input driver.

use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use photo_gallery::assets::{AssetProvider, StaticAssets};
use photo_gallery::config::Configuration;
use photo_gallery::events::{Frame, UserInput};
use photo_gallery::gallery::{Gallery, GalleryOptions};
use photo_gallery::tasks;

#[derive(Debug, Parser)]
#[command(
    name = "photo-gallery",
    version,
    about = "Auto-rotating image gallery with a lightbox"
)]
struct Args {
    /// Path to YAML config
    #[arg(value_name = "CONFIG", default_value = "gallery.yaml")]
    config: PathBuf,

    /// Override the auto-advance interval (e.g. "3s", "1500ms")
    #[arg(long, value_name = "DURATION")]
    interval: Option<humantime::Duration>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("photo_gallery={level}").parse()?);
    // Frames go to stdout; keep logs on stderr.
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        interval,
        verbose,
    } = Args::parse();
    init_tracing(verbose)?;

    let mut cfg = Configuration::from_yaml_file(&config)
        .with_context(|| format!("failed to load configuration from {}", config.display()))?;
    if let Some(interval) = interval {
        cfg.interval = interval.into();
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    tracing::debug!("Loaded configuration from {}:\n{:#?}", config.display(), cfg);

    let records = StaticAssets::from_config(&cfg)
        .records()
        .context("failed to collect gallery records")?;
    let options = GalleryOptions::from(&cfg);

    let (input_tx, input_rx) = mpsc::channel::<UserInput>(16); // Input -> Gallery
    let (frames_tx, frames_rx) = mpsc::channel::<Frame>(4); // Gallery -> Renderer

    let cancel = CancellationToken::new();
    let gallery =
        Gallery::mount(records, options, cancel.clone()).context("failed to mount gallery")?;

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    // Only an interactive stdin ends the show on EOF; headless runs stop on ctrl-c.
    let interactive = io::stdin().is_terminal();
    if !interactive {
        tracing::debug!("stdin is not a terminal; EOF will not stop the gallery");
    }
    tasks::input::spawn_reader(
        BufReader::new(io::stdin()),
        input_tx,
        cancel.clone(),
        interactive,
    );

    let mut tasks = JoinSet::new();

    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            tasks::renderer::run(frames_rx, tokio::io::stdout(), cancel)
                .await
                .context("renderer task failed")
        }
    });

    tasks.spawn(async move {
        gallery
            .run(input_rx, frames_tx)
            .await
            .context("gallery task failed")
    });

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
        // Either side finishing ends the show.
        cancel.cancel();
    }

    Ok(())
}
