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

//! Configuration Tests
//!
//! Loads configuration files from disk and checks that the resulting server
//! honours the configured versioning policy.

#![allow(clippy::unwrap_used)]

mod test_support;

use assert_matches::assert_matches;
use axum::{body::Body, http::Request, http::StatusCode};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;
use test_support::{app_with, get, send};
use versioned_api_server::config::ConfigError;
use versioned_api_server::load_config_file;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[tokio::test]
async fn test_custom_readers_and_default() {
    let file = write_config(
        r#"
host: 127.0.0.1
port: 9090
versioning:
  default_version: "2.0"
  readers:
    - kind: header
      name: api-ver
"#,
    );
    let config = load_config_file(file.path()).unwrap();
    let app = app_with(config);

    // Unspecified requests use the configured default.
    let response = get(&app, "/api/team/GetTeam").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "V2 Get to be implemented");

    // The configured header is read.
    let request = Request::get("/api/team/GetTeam")
        .header("api-ver", "1.0")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.text(), "V1 Get to be implemented");

    // Readers that are not configured are ignored.
    let response = get(&app, "/api/team/GetTeam?api-version=1.0").await;
    assert_eq!(response.text(), "V2 Get to be implemented");

    // Without a URL segment reader there is no versioned path.
    let response = get(&app, "/api/v1/team/GetTeam").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_env_interpolated_config() {
    std::env::set_var("VAS_IT_DEFAULT_VERSION", "2.0");
    let file = write_config(
        r#"
port: ${VAS_IT_PORT_UNSET:-8181}
enable_docs: false
versioning:
  default_version: "${VAS_IT_DEFAULT_VERSION}"
"#,
    );
    let config = load_config_file(file.path()).unwrap();
    std::env::remove_var("VAS_IT_DEFAULT_VERSION");

    assert_eq!(config.port, 8181);
    assert!(!config.enable_docs);
    assert_eq!(config.versioning.default_version, "2.0");

    let app = app_with(config);
    let response = get(&app, "/swagger/v1/swagger.json").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[test]
#[serial]
fn test_missing_env_var_fails() {
    std::env::remove_var("VAS_IT_MISSING");
    let file = write_config("host: ${VAS_IT_MISSING}\n");
    assert_matches!(
        load_config_file(file.path()),
        Err(ConfigError::InterpolationError(_))
    );
}

#[test]
fn test_invalid_versioning_settings() {
    let malformed_default = write_config("versioning:\n  default_version: \"one\"\n");
    assert_matches!(
        load_config_file(malformed_default.path()),
        Err(ConfigError::ValidationError(_))
    );

    let malformed_sunset = write_config("versioning:\n  sunset:\n    \"x.y\": \"soon\"\n");
    assert_matches!(
        load_config_file(malformed_sunset.path()),
        Err(ConfigError::ValidationError(_))
    );

    let no_way_to_resolve = write_config(
        "versioning:\n  assume_default_when_unspecified: false\n  readers: []\n",
    );
    assert_matches!(
        load_config_file(no_way_to_resolve.path()),
        Err(ConfigError::ValidationError(_))
    );
}

#[test]
fn test_unknown_reader_kind_fails_to_parse() {
    let file = write_config("versioning:\n  readers:\n    - kind: cookie\n      name: v\n");
    assert_matches!(
        load_config_file(file.path()),
        Err(ConfigError::ParseError { .. })
    );
}
