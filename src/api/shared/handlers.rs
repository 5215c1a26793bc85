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

//! Operational handlers that sit outside any resource.

use axum::{extract::Extension, response::Json};

use super::responses::{ApiVersionsResponse, HealthResponse};
use crate::versioning::VersionedApi;

/// Greeting served at the site root
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain"),
    ),
    tag = "Health"
)]
pub async fn root() -> &'static str {
    "Hello world!!!"
}

/// Check server health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List available API versions
#[utoipa::path(
    get,
    path = "/api/versions",
    responses(
        (status = 200, description = "API versions served by versioned routes", body = ApiVersionsResponse),
    ),
    tag = "API"
)]
pub async fn list_api_versions(
    Extension(api): Extension<VersionedApi>,
) -> Json<ApiVersionsResponse> {
    Json(ApiVersionsResponse::from_registry(
        api.registry(),
        api.resolver().default_version(),
        api.resolver().assumes_default(),
    ))
}
