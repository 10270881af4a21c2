// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Two-tier loading:
//! 1. TOML file (base values, every section optional)
//! 2. Environment variables (runtime overrides)

use crate::validation::validate_config;
use crate::{ConfigError, ConfigResult, EvomindConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name searched for in the working directory and its
/// ancestors.
pub const CONFIG_FILE_NAME: &str = "evomind_configuration.toml";

/// Find the evomind configuration file
///
/// Search order:
/// 1. `EVOMIND_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Ancestor directories (up to 5 levels, for workspace roots)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any
/// location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("EVOMIND_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by EVOMIND_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd;
        for _ in 0..5 {
            let Some(parent) = current.parent().map(Path::to_path_buf) else {
                break;
            };
            search_paths.push(parent.join(CONFIG_FILE_NAME));
            current = parent;
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet EVOMIND_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load, override, and validate the configuration.
///
/// With `path = None` the file is discovered via [`find_config_file`]; a
/// missing file is not an error in that case — defaults are used, since
/// every configuration value has one.
pub fn load_config(path: Option<&Path>) -> ConfigResult<EvomindConfig> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => match find_config_file() {
            Ok(found) => parse_file(&found)?,
            Err(ConfigError::FileNotFound(_)) => EvomindConfig::default(),
            Err(err) => return Err(err),
        },
    };

    apply_environment_overrides(&mut config)?;
    validate_config(&config)?;
    Ok(config)
}

fn parse_file(path: &Path) -> ConfigResult<EvomindConfig> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Apply `EVOMIND_*` environment overrides on top of the file values.
pub fn apply_environment_overrides(config: &mut EvomindConfig) -> ConfigResult<()> {
    if let Ok(value) = env::var("EVOMIND_TICK_PERIOD") {
        config.engine.tick_period = value
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("EVOMIND_TICK_PERIOD={}", value)))?;
    }
    if let Ok(value) = env::var("EVOMIND_WORKER_THREADS") {
        config.engine.worker_threads = value
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("EVOMIND_WORKER_THREADS={}", value)))?;
    }
    if let Ok(value) = env::var("EVOMIND_PLASTICITY_ENABLED") {
        config.plasticity.enabled = matches!(value.as_str(), "1" | "true" | "TRUE" | "True");
    }
    if let Ok(value) = env::var("EVOMIND_PLASTICITY_RULE") {
        config.plasticity.rule = value;
    }
    if let Ok(value) = env::var("EVOMIND_LOG_LEVEL") {
        config.logging.level = value;
    }
    Ok(())
}
