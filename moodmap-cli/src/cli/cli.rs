use clap::Parser;
use std::path::PathBuf;

use crate::render::ColorMode;

/// moodmap — a mood journal pinned to a map
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Replay the commands in this file instead of reading them from stdin.
    /// One command per line; blank lines and lines starting with `#` are skipped.
    #[arg(long, short)]
    pub script: Option<PathBuf>,
    /// Use this config file instead of the default locations.
    #[arg(long, env = "MOODMAP_CONFIG")]
    pub config: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// `list` only shows one line per entry.
    #[arg(long)]
    pub short: bool,
    /// Stop at the first command that fails (script mode only).
    #[arg(long, requires = "script")]
    pub strict: bool,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}
