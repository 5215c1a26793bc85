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

//! Reported-version metadata attached to responses.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use super::error::join_versions;
use super::version::ApiVersion;

pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";
pub const DEPRECATED_VERSIONS_HEADER: &str = "api-deprecated-versions";
pub const DEPRECATION_HEADER: &str = "deprecation";
pub const SUNSET_HEADER: &str = "sunset";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
    /// Non-deprecated versions served at the route.
    pub supported_versions: Vec<ApiVersion>,
    /// Deprecated versions still served at the route.
    pub deprecated_versions: Vec<ApiVersion>,
    /// Whether the version that handled this request is deprecated.
    pub deprecated: bool,
    pub sunset: Option<String>,
}

impl ResponseMetadata {
    /// Split the versions registered at a route into supported and deprecated.
    pub fn for_route(versions: &[ApiVersion]) -> Self {
        let (deprecated_versions, supported_versions): (Vec<_>, Vec<_>) = versions.iter().cloned().partition(ApiVersion::is_deprecated);
        Self {
            supported_versions,
            deprecated_versions,
            deprecated: false,
            sunset: None,
        }
    }

    /// Every version served at the route, deprecated or not, ascending.
    pub fn all_versions(&self) -> Vec<ApiVersion> {
        let mut all: Vec<ApiVersion> = self
            .supported_versions
            .iter()
            .chain(&self.deprecated_versions)
            .cloned()
            .collect();
        all.sort();
        all
    }

    /// Write the metadata as response headers.
    ///
    /// `report_versions` controls the supported/deprecated version lists; the
    /// deprecation marker and sunset hint are always written.
    pub fn apply(&self, headers: &mut HeaderMap, report_versions: bool) {
        if report_versions {
            insert(headers, SUPPORTED_VERSIONS_HEADER, &join_versions(&self.all_versions()));
            if !self.deprecated_versions.is_empty() {
                insert(
                    headers,
                    DEPRECATED_VERSIONS_HEADER,
                    &join_versions(&self.deprecated_versions),
                );
            }
        }
        if self.deprecated {
            insert(headers, DEPRECATION_HEADER, "true");
            if let Some(sunset) = &self.sunset {
                insert(headers, SUNSET_HEADER, sunset);
            }
        }
    }
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(HeaderName::from_static(name), value);
    }
}
