//! Configuration loading

use anyhow::Result;
use std::path::Path;

use crate::Config;

const CONFIG_PATH_ENV: &str = "TUNEIN_CONFIG_PATH";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Load configuration from config file or environment variables
///
/// Config file search order:
/// 1. `TUNEIN_CONFIG_PATH` environment variable (explicit path)
/// 2. ./config.yaml (current working directory)
/// 3. Fall back to environment variables only
///
/// Logging is not initialized yet when this runs, so progress goes to stderr.
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file(std::env::var(CONFIG_PATH_ENV).ok());

    let config = if let Some(path) = config_path {
        eprintln!("Loading config from {path}");
        Config::from_file(&path).map_err(|e| anyhow::anyhow!("Failed to load {path}: {e}"))?
    } else {
        eprintln!("No config file found, using environment variables");
        Config::from_env()?
    };

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Config validation error: {error}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s): {}",
            errors.len(),
            errors.join("; ")
        ));
    }

    Ok(config)
}

fn find_config_file(explicit: Option<String>) -> Option<String> {
    explicit
        .filter(|p| Path::new(p).exists())
        .or_else(|| {
            Path::new(DEFAULT_CONFIG_FILE)
                .exists()
                .then(|| DEFAULT_CONFIG_FILE.to_string())
        })
}
