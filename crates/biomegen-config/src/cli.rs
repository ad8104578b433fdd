//! Command-line argument parsing for biomegen.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// biomegen command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "biomegen", about = "Layered-noise terrain and biome map generator")]
pub struct CliArgs {
    /// Map width in cells.
    #[arg(long)]
    pub width: Option<u32>,

    /// Map height in cells.
    #[arg(long)]
    pub height: Option<u32>,

    /// Noise scale (coordinate divisor, must be > 0).
    #[arg(long)]
    pub scale: Option<f64>,

    /// Horizontal pan applied to every sample.
    #[arg(long, allow_hyphen_values = true)]
    pub offset_x: Option<f64>,

    /// Vertical pan applied to every sample.
    #[arg(long, allow_hyphen_values = true)]
    pub offset_y: Option<f64>,

    /// Worker threads per field (0 = one per CPU).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.terrain.width = w;
        }
        if let Some(h) = args.height {
            self.terrain.height = h;
        }
        if let Some(scale) = args.scale {
            self.terrain.scale = scale;
        }
        if let Some(x) = args.offset_x {
            self.terrain.offset.x = x;
        }
        if let Some(y) = args.offset_y {
            self.terrain.offset.y = y;
        }
        if let Some(threads) = args.threads {
            self.generation.worker_threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
