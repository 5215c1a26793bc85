// Copyright 2025 The Drasi Authors.
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

//! Configuration loading with environment variable interpolation.

use log::info;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::env_interpolation;
use super::types::ServerConfig;

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] env_interpolation::InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] anyhow::Error),
}

/// Deserialize YAML after interpolating `${VAR}` references.
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// Deserialize JSON after interpolating `${VAR}` references.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Load and validate a configuration file.
///
/// The file is interpolated, parsed as YAML and, failing that, as JSON.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let interpolated = env_interpolation::interpolate(&content)?;

    let config = match serde_yaml::from_str::<ServerConfig>(&interpolated) {
        Ok(config) => config,
        Err(yaml_err) => match serde_json::from_str::<ServerConfig>(&interpolated) {
            Ok(config) => config,
            Err(json_err) => {
                return Err(ConfigError::ParseError {
                    path: path.display().to_string(),
                    yaml_err: yaml_err.to_string(),
                    json_err: json_err.to_string(),
                })
            }
        },
    };

    config.validate()?;
    Ok(config)
}

/// Write `config` as YAML.
pub fn save_config_file<P: AsRef<Path>>(config: &ServerConfig, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(config)?)?;
    Ok(())
}

/// Write a default configuration to `path` unless a file is already there.
///
/// Returns whether the file was created.
pub fn ensure_config_file<P: AsRef<Path>>(path: P) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    info!(
        "Config file '{}' not found. Creating default configuration.",
        path.display()
    );
    save_config_file(&ServerConfig::default(), path)?;
    Ok(true)
}

/// Load `path`, first writing a default configuration there if it does not exist.
pub fn load_or_create_config<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ConfigError> {
    let path = path.as_ref();
    ensure_config_file(path)?;
    load_config_file(path)
}
