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

//! Server configuration.
//!
//! Files are YAML (JSON is accepted as a fallback) and may reference
//! environment variables as `${VAR}` or `${VAR:-default}`.
//!
//! ```yaml
//! host: ${SERVER_HOST:-0.0.0.0}
//! port: ${SERVER_PORT:-8080}
//! log_level: info
//! enable_docs: true
//! static_dir: ./wwwroot
//! versioning:
//!   assume_default_when_unspecified: true
//!   default_version: "1.0"
//!   report_api_versions: true
//!   readers:
//!     - kind: query
//!       name: api-version
//!     - kind: header
//!       name: X-Version
//!     - kind: media_type
//!       name: ver
//!     - kind: url_segment
//!       name: version
//!   sunset:
//!     "1.0": "Wed, 01 Jan 2031 00:00:00 GMT"
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod types;

pub use loader::{
    ensure_config_file, from_json_str, from_yaml_str, load_config_file, load_or_create_config,
    save_config_file, ConfigError,
};
pub use types::{ServerConfig, VersioningSettings};
