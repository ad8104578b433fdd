//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use biomegen_terrain::{
    BiomeDef, BiomeRegistry, MapSettings, NoiseFieldGenerator, TerrainError, Wave,
};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Map shape and noise stacks.
    pub terrain: TerrainConfig,
    /// Ordered biome table. The first entry is the classification fallback.
    pub biomes: Vec<BiomeDef>,
    /// Generation performance settings.
    pub generation: GenerationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Map dimensions, sampling transform, and one wave stack per field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Map width in cells.
    pub width: u32,
    /// Map height in cells.
    pub height: u32,
    /// Coordinate divisor; larger values produce broader features.
    pub scale: f64,
    /// Pan applied to every sample.
    pub offset: DVec2,
    pub height_waves: Vec<Wave>,
    pub moisture_waves: Vec<Wave>,
    pub heat_waves: Vec<Wave>,
}

/// Generation performance settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Worker threads per field (0 = one per CPU, 1 = generate inline).
    pub worker_threads: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            biomes: default_biomes(),
            generation: GenerationConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            scale: 20.0,
            offset: DVec2::ZERO,
            height_waves: vec![Wave::octave(56, 0), Wave::octave(199, 1), Wave::octave(7, 2)],
            moisture_waves: vec![Wave::octave(621, 0)],
            heat_waves: vec![Wave::octave(318, 0), Wave::octave(329, 1)],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// The stock biome table, ocean first so it doubles as the fallback.
pub fn default_biomes() -> Vec<BiomeDef> {
    [
        ("ocean", 0.0, 0.0, 0.0, [40, 90, 170]),
        ("beach", 0.3, 0.0, 0.4, [220, 210, 150]),
        ("grassland", 0.35, 0.3, 0.35, [120, 180, 80]),
        ("forest", 0.4, 0.5, 0.3, [40, 120, 60]),
        ("jungle", 0.4, 0.6, 0.6, [20, 140, 55]),
        ("desert", 0.35, 0.0, 0.6, [230, 200, 120]),
        ("tundra", 0.4, 0.0, 0.0, [170, 190, 170]),
        ("mountain", 0.7, 0.0, 0.0, [130, 130, 130]),
        ("snow", 0.85, 0.0, 0.0, [245, 250, 255]),
    ]
    .into_iter()
    .map(|(name, min_height, min_moisture, min_heat, color)| BiomeDef {
        name: name.to_string(),
        min_height,
        min_moisture,
        min_heat,
        color,
        tile: format!("tiles/{name}.png"),
    })
    .collect()
}

impl TerrainConfig {
    /// Converts to the generator's settings type.
    pub fn to_map_settings(&self) -> MapSettings {
        MapSettings {
            width: self.width as usize,
            height: self.height as usize,
            scale: self.scale,
            offset: self.offset,
            height_waves: self.height_waves.clone(),
            moisture_waves: self.moisture_waves.clone(),
            heat_waves: self.heat_waves.clone(),
        }
    }
}

impl Config {
    /// Builds a validated biome registry from the biome table.
    pub fn biome_registry(&self) -> Result<BiomeRegistry, ConfigError> {
        let registry = BiomeRegistry::from_defs(self.biomes.iter().cloned())?;
        if registry.is_empty() {
            return Err(TerrainError::InvalidConfiguration("no biomes configured".into()).into());
        }
        Ok(registry)
    }

    /// Checks that the config describes a generatable map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let settings = self.terrain.to_map_settings();
        let generator = NoiseFieldGenerator::new(settings.shape())?;
        for waves in [
            &settings.height_waves,
            &settings.moisture_waves,
            &settings.heat_waves,
        ] {
            generator.validate_waves(waves)?;
        }
        self.biome_registry()?;
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
