//! Structured logging for biomegen.
//!
//! Installs a `tracing` subscriber with console output (uptime timestamps and
//! module paths), plus JSON file logging in debug builds. The level comes from
//! `RUST_LOG` when set, otherwise from the config's `debug.log_level`.

use std::path::Path;

use biomegen_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor a config level is available.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "biomegen.log";

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - Optional directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `config` - Optional configuration supplying the log level
///
/// # Examples
///
/// ```no_run
/// use biomegen_config::Config;
/// use biomegen_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_from_config(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter directive string derived from the config, falling back to
/// [`DEFAULT_FILTER`] when the configured level is blank.
pub fn filter_from_config(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_filter_from_config_level() {
        let mut config = Config::default();
        config.debug.log_level = "debug,biomegen_terrain=trace".to_string();
        assert_eq!(
            filter_from_config(Some(&config)),
            "debug,biomegen_terrain=trace"
        );
    }

    #[test]
    fn test_blank_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_from_config(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_from_config(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,biomegen_terrain=trace",
            "warn,biomegen_config=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_init_logging_writes_json_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let mut config = Config::default();
        config.debug.log_level = "info".to_string();

        init_logging(Some(&log_dir), true, Some(&config));
        tracing::warn!(cells = 42, "terrain map generated");

        let contents = std::fs::read_to_string(log_dir.join(LOG_FILE_NAME)).unwrap();
        let line = contents
            .lines()
            .find(|line| line.contains("terrain map generated"))
            .unwrap();
        assert!(line.starts_with('{'), "expected JSON, got: {line}");
        assert!(line.contains("\"level\":\"WARN\""));
        assert!(line.contains("\"cells\":42"));
    }
}
