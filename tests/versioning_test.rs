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

//! Versioned Route Tests
//!
//! Drives the team resource through every version reader and checks the
//! resolution outcomes and reported-version headers end to end.

#![allow(clippy::unwrap_used)]

mod test_support;

use axum::{body::Body, http::Request, http::StatusCode};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use test_case::test_case;
use test_support::{app, app_with, get, send};
use versioned_api_server::config::VersioningSettings;
use versioned_api_server::ServerConfig;

const V1_GET: &str = "V1 Get to be implemented";
const V2_GET: &str = "V2 Get to be implemented";

fn get_with_header(uri: &str, name: &str, value: &str) -> Request<Body> {
    Request::get(uri).header(name, value).body(Body::empty()).unwrap()
}

#[test_case("/api/team/GetTeam?api-version=1.0", V1_GET ; "query 1.0")]
#[test_case("/api/team/GetTeam?api-version=2.0", V2_GET ; "query 2.0")]
#[test_case("/api/team/GetTeam?api-version=2", V2_GET ; "query major only")]
#[test_case("/api/v1/team/GetTeam", V1_GET ; "url segment v1")]
#[test_case("/api/v2/team/GetTeam", V2_GET ; "url segment v2")]
#[test_case("/api/2.0/team/GetTeam", V2_GET ; "url segment without prefix")]
#[test_case("/api/team/GetTeam", V1_GET ; "unspecified uses default")]
#[tokio::test]
async fn test_get_team_by_uri(uri: &str, expected: &str) {
    let app = app();
    let response = get(&app, uri).await;
    assert_eq!(response.status, StatusCode::OK, "{uri}");
    assert_eq!(response.text(), expected);
}

#[tokio::test]
async fn test_header_reader() {
    let app = app();
    let response = send(
        &app,
        get_with_header("/api/team/GetTeam", "X-Version", "2.0"),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), V2_GET);
}

#[tokio::test]
async fn test_media_type_reader() {
    let app = app();
    let response = send(
        &app,
        get_with_header("/api/team/GetTeam", "Accept", "application/json;ver=2.0"),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), V2_GET);
}

#[tokio::test]
async fn test_agreeing_readers_are_accepted() {
    let app = app();
    let response = send(
        &app,
        get_with_header("/api/v2/team/GetTeam?api-version=2.0", "X-Version", "2.0"),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), V2_GET);
}

#[tokio::test]
async fn test_conflicting_readers_are_rejected() {
    let app = app();
    let response = send(
        &app,
        get_with_header("/api/team/GetTeam?api-version=1.0", "X-Version", "2.0"),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "AMBIGUOUS_API_VERSION");
}

#[tokio::test]
async fn test_unsupported_version() {
    let app = app();
    let response = send(
        &app,
        get_with_header("/api/team/GetTeam", "X-Version", "3.0"),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "UNSUPPORTED_API_VERSION");
    assert_eq!(response.header("api-supported-versions"), Some("1.0, 2.0"));
}

#[tokio::test]
async fn test_malformed_version() {
    let app = app();
    let response = get(&app, "/api/team/GetTeam?api-version=one").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "MALFORMED_API_VERSION");
}

#[tokio::test]
async fn test_deprecated_version_headers() {
    let mut sunset = IndexMap::new();
    sunset.insert("1.0".to_string(), "Wed, 01 Jan 2031 00:00:00 GMT".to_string());
    let app = app_with(ServerConfig {
        versioning: VersioningSettings {
            sunset,
            ..Default::default()
        },
        ..Default::default()
    });

    let response = get(&app, "/api/team/GetTeam?api-version=1.0").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("deprecation"), Some("true"));
    assert_eq!(response.header("sunset"), Some("Wed, 01 Jan 2031 00:00:00 GMT"));
    assert_eq!(response.header("api-supported-versions"), Some("1.0, 2.0"));
    assert_eq!(response.header("api-deprecated-versions"), Some("1.0"));

    let response = get(&app, "/api/team/GetTeam?api-version=2.0").await;
    assert_eq!(response.header("deprecation"), None);
    assert_eq!(response.header("sunset"), None);
    assert_eq!(response.header("api-supported-versions"), Some("1.0, 2.0"));
}

#[tokio::test]
async fn test_reporting_disabled() {
    let app = app_with(ServerConfig {
        versioning: VersioningSettings {
            report_api_versions: false,
            ..Default::default()
        },
        ..Default::default()
    });

    let response = get(&app, "/api/team/GetTeam?api-version=1.0").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("api-supported-versions"), None);
    assert_eq!(response.header("deprecation"), Some("true"));
}

#[tokio::test]
async fn test_version_required_when_no_default() {
    let app = app_with(ServerConfig {
        versioning: VersioningSettings {
            assume_default_when_unspecified: false,
            ..Default::default()
        },
        ..Default::default()
    });

    let response = get(&app, "/api/team/GetTeam").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "AMBIGUOUS_API_VERSION");

    let response = get(&app, "/api/team/GetTeam?api-version=2.0").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_post_team_for_both_versions() {
    let app = app();
    for uri in ["/api/v1/team", "/api/v2/team"] {
        let response = send(&app, Request::post(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert_eq!(response.text(), "V1 Post to be implemented");
    }
}

#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    let app = app();
    let response = send(
        &app,
        Request::delete("/api/v2/team/GetTeam").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_list_api_versions() {
    let app = app();
    let response = get(&app, "/api/versions").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["default_version"], "1.0");
    assert_eq!(body["assume_default_when_unspecified"], true);
    let versions = body["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0]["group"], "v1");
    assert_eq!(versions[0]["deprecated"], true);
    assert_eq!(versions[1]["version"], "2.0");
    assert_eq!(versions[1]["deprecated"], false);
}
