//! biomegen: generate a terrain map from `config.ron` and report what came out.

mod summary;

use std::path::Path;
use std::process::ExitCode;

use biomegen_config::{CliArgs, Config, ConfigError};
use biomegen_terrain::TerrainMap;
use clap::Parser;
use tracing::{error, info};

use crate::summary::MapSummary;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let Some(config_dir) = args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("biomegen")))
    else {
        eprintln!("Could not resolve a config directory; pass --config");
        return ExitCode::FAILURE;
    };

    let config = match load_config(&config_dir, &args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_dir.display());
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config_dir.join("logs");
    biomegen_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(summary) => {
            print!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads (or creates) the config, applies CLI overrides, and re-validates the
/// result since overrides can make a valid file unusable.
fn load_config(config_dir: &Path, args: &CliArgs) -> Result<Config, ConfigError> {
    let mut config = Config::load_or_create(config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok(config)
}

fn run(config: &Config) -> Result<MapSummary, ConfigError> {
    let registry = config.biome_registry()?;
    let settings = config.terrain.to_map_settings();
    let workers = config.generation.worker_threads;

    let start = std::time::Instant::now();
    let map = if workers == 1 {
        TerrainMap::generate(&settings, &registry)?
    } else {
        TerrainMap::generate_parallel(&settings, &registry, workers)?
    };
    info!(
        elapsed_us = start.elapsed().as_micros() as u64,
        workers, "map ready"
    );

    Ok(MapSummary::new(&map, &registry))
}
