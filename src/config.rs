//! Command-line configuration for the `blockfall` binary.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::types::FRAME_MS;

/// Falling-block puzzle game for the terminal.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "blockfall", author, version, about, long_about = None)]
pub struct Config {
    /// Seed for piece selection; defaults to one derived from the clock.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Frame period in milliseconds.
    #[arg(
        long,
        default_value_t = FRAME_MS,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub frame_ms: u32,

    /// Terminal columns per board cell.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=4))]
    pub cell_width: u16,

    /// Write logs to this file (level from RUST_LOG, default info).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// The configured seed, or one taken from the system clock.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
