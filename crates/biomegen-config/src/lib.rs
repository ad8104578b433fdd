//! Configuration for biomegen.
//!
//! Map dimensions, wave stacks and biome tables persist to disk as a RON file.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GenerationConfig, TerrainConfig, default_biomes};
pub use error::ConfigError;
