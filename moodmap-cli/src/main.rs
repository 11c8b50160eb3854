mod cli;
mod common;
mod render;
mod session;

use anyhow::Result;
use cli::Cli;
use moodmap_core::{Config, Controller, RecordingMap, View};
use render::{RenderOptions, Renderer, use_color};
use session::Session;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("moodmap: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MOODMAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<()> {
    init_logging();
    let cli = Cli::new();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(?config, "loaded config");

    let renderer = Renderer::new(Some(RenderOptions {
        date_format: config.date_format.clone(),
        use_color: use_color(cli.color),
        short_mode: cli.short,
    }));
    let map = RecordingMap::new(View {
        center: config.center,
        zoom: config.zoom,
    });
    let mut session = Session::new(Controller::new(config, map), renderer);

    match &cli.script {
        Some(path) => session.run_script(path, cli.strict),
        None => session.run_interactive(),
    }
}
