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

//! Common response types.

use serde::Serialize;
use utoipa::ToSchema;

use crate::versioning::{ApiVersion, RouteRegistry};

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status of the server
    pub status: String,
    /// Current server timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// One API version served by this server
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiVersionInfo {
    /// Version in `major.minor[-status]` form
    pub version: String,
    /// Documentation group name, e.g. `v1`
    pub group: String,
    /// Whether the version is deprecated
    pub deprecated: bool,
}

/// Response listing available API versions
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiVersionsResponse {
    /// Every version registered on any versioned route, ascending
    pub versions: Vec<ApiVersionInfo>,
    /// Version used when a request names none
    pub default_version: String,
    /// Whether requests without a version fall back to the default
    pub assume_default_when_unspecified: bool,
}

impl ApiVersionsResponse {
    pub fn from_registry<H>(
        registry: &RouteRegistry<H>,
        default_version: &ApiVersion,
        assume_default_when_unspecified: bool,
    ) -> Self {
        let versions = registry
            .all_versions()
            .into_iter()
            .map(|version| ApiVersionInfo {
                version: version.to_string(),
                group: version.group_name(),
                deprecated: version.is_deprecated(),
            })
            .collect();

        Self {
            versions,
            default_version: default_version.to_string(),
            assume_default_when_unspecified,
        }
    }
}
