// Copyright 2025 The Nekor Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration loading.
//!
//! Text is interpolated from the environment first, then parsed as YAML with
//! JSON as the fallback, then validated.

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::env_interpolation::{self, InterpolationError};
use super::types::{NekorServerConfig, ENV_CONFIG_TEMPLATE};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] anyhow::Error),
}

/// Interpolate and deserialize YAML.
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// Interpolate and deserialize JSON.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Load and validate a YAML or JSON config file.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<NekorServerConfig, ConfigError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)?;
    let interpolated = env_interpolation::interpolate(&content)?;

    let config = match serde_yaml::from_str::<NekorServerConfig>(&interpolated) {
        Ok(config) => config,
        Err(yaml_err) => match serde_json::from_str::<NekorServerConfig>(&interpolated) {
            Ok(config) => config,
            Err(json_err) => {
                return Err(ConfigError::ParseError {
                    path: path_ref.display().to_string(),
                    yaml_err: yaml_err.to_string(),
                    json_err: json_err.to_string(),
                });
            }
        },
    };

    config.validate()?;
    Ok(config)
}

/// Build and validate the configuration from `HOST`, `PORT`, `LOG_LEVEL`,
/// `DB_URI` and the collection variables alone.
pub fn load_config_from_env() -> Result<NekorServerConfig, ConfigError> {
    let config: NekorServerConfig = from_yaml_str(ENV_CONFIG_TEMPLATE)?;
    config.validate()?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to the environment.
pub fn load_config(path: &Path) -> Result<NekorServerConfig, ConfigError> {
    if path.exists() {
        info!("Loading configuration from {}", path.display());
        load_config_file(path)
    } else {
        info!(
            "Config file '{}' not found, configuring from environment",
            path.display()
        );
        load_config_from_env()
    }
}

/// Load `.env` from the working directory and from the config file's
/// directory. Variables already set in the process win.
pub fn load_dotenv(config_path: &Path) {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env file: {e}"),
    }

    let Some(config_dir) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return;
    };
    let env_file = config_dir.join(".env");
    if env_file.exists() {
        match dotenvy::from_path(&env_file) {
            Ok(()) => debug!("Loaded environment from {}", env_file.display()),
            Err(e) => warn!("Failed to load {}: {e}", env_file.display()),
        }
    }
}
