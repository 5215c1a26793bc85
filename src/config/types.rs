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

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::versioning::{
    ApiVersion, ConfigurationError, ReaderChain, VersionReader, VersionResolver,
};

/// Top-level server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Serve OpenAPI documents and Swagger UI
    #[serde(default = "default_true")]
    pub enable_docs: bool,
    /// Directory served for requests no route matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    #[serde(default)]
    pub versioning: VersioningSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            enable_docs: true,
            static_dir: None,
            versioning: VersioningSettings::default(),
        }
    }
}

/// How request versions are read and resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersioningSettings {
    /// Serve `default_version` when a request names no version
    #[serde(default = "default_true")]
    pub assume_default_when_unspecified: bool,
    #[serde(default = "default_version_token")]
    pub default_version: String,
    /// Emit `api-supported-versions` / `api-deprecated-versions` headers
    #[serde(default = "default_true")]
    pub report_api_versions: bool,
    #[serde(default = "default_readers")]
    pub readers: Vec<VersionReader>,
    /// Version → sunset hint (e.g. an HTTP date) for deprecated versions
    #[serde(default)]
    pub sunset: IndexMap<String, String>,
}

impl Default for VersioningSettings {
    fn default() -> Self {
        Self {
            assume_default_when_unspecified: true,
            default_version: default_version_token(),
            report_api_versions: true,
            readers: default_readers(),
            sunset: IndexMap::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_version_token() -> String {
    "1.0".to_string()
}

fn default_readers() -> Vec<VersionReader> {
    ReaderChain::default().readers().to_vec()
}

impl VersioningSettings {
    pub fn default_api_version(&self) -> Result<ApiVersion, ConfigurationError> {
        ApiVersion::parse(&self.default_version).map_err(|source| {
            ConfigurationError::MalformedDefaultVersion {
                token: self.default_version.clone(),
                source,
            }
        })
    }

    pub fn sunset_hints(&self) -> Result<HashMap<ApiVersion, String>, ConfigurationError> {
        self.sunset
            .iter()
            .map(|(token, hint)| {
                ApiVersion::parse(token)
                    .map(|version| (version, hint.clone()))
                    .map_err(|source| ConfigurationError::MalformedSunsetVersion {
                        token: token.clone(),
                        source,
                    })
            })
            .collect()
    }

    pub fn reader_chain(&self) -> ReaderChain {
        ReaderChain::new(self.readers.clone())
    }

    pub fn resolver(&self) -> Result<VersionResolver, ConfigurationError> {
        Ok(VersionResolver::new(
            self.reader_chain(),
            self.assume_default_when_unspecified,
            self.default_api_version()?,
        ))
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("Invalid port: {} (cannot be 0)", self.port));
        }

        if self.host.trim().is_empty() {
            return Err(anyhow!("Host cannot be empty"));
        }

        self.versioning.validate()
    }
}

impl VersioningSettings {
    fn validate(&self) -> Result<()> {
        self.default_api_version()?;
        self.sunset_hints()?;

        if let Some(reader) = self.readers.iter().find(|r| r.name().trim().is_empty()) {
            return Err(anyhow!("Version reader of kind '{}' has an empty name", reader.source()));
        }

        if self.readers.is_empty() && !self.assume_default_when_unspecified {
            return Err(anyhow!(
                "No version readers are configured and assume_default_when_unspecified is false; every versioned request would be rejected"
            ));
        }

        Ok(())
    }
}
