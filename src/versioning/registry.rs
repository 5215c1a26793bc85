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

//! Registry of versioned route handlers.
//!
//! Built once at startup through explicit [`RouteRegistry::register`] calls and
//! shared read-only afterwards, so lookups never take a lock.

use indexmap::IndexMap;
use std::collections::BTreeSet;

use super::error::ConfigurationError;
use super::version::ApiVersion;

/// A (route template, version) binding to a handler.
#[derive(Debug, Clone)]
pub struct RouteRegistration<H> {
    pub route_template: String,
    pub version: ApiVersion,
    pub sunset: Option<String>,
    pub handler: H,
}

impl<H> RouteRegistration<H> {
    pub fn is_deprecated(&self) -> bool {
        self.version.is_deprecated()
    }
}

/// Route template → version → registration.
///
/// Templates keep their registration order; versions within a template are
/// kept sorted.
#[derive(Debug, Clone)]
pub struct RouteRegistry<H> {
    routes: IndexMap<String, IndexMap<ApiVersion, RouteRegistration<H>>>,
}

impl<H> RouteRegistry<H> {
    pub fn new() -> Self {
        Self {
            routes: IndexMap::new(),
        }
    }

    /// Bind `handler` to `(route_template, version)`.
    ///
    /// Fails without touching the registry when the pair is already bound.
    pub fn register(
        &mut self,
        route_template: impl Into<String>,
        version: ApiVersion,
        handler: H,
    ) -> Result<(), ConfigurationError> {
        self.register_with_sunset(route_template, version, None, handler)
    }

    /// Like [`register`](Self::register), with a sunset hint reported when the
    /// version is deprecated.
    pub fn register_with_sunset(
        &mut self,
        route_template: impl Into<String>,
        version: ApiVersion,
        sunset: Option<String>,
        handler: H,
    ) -> Result<(), ConfigurationError> {
        let route_template = route_template.into();
        if self.lookup(&route_template, &version).is_some() {
            return Err(ConfigurationError::DuplicateRegistration {
                route: route_template,
                version,
            });
        }

        let versions = self.routes.entry(route_template.clone()).or_default();
        versions.insert(
            version.clone(),
            RouteRegistration {
                route_template,
                version,
                sunset,
                handler,
            },
        );
        versions.sort_keys();
        Ok(())
    }

    /// Exact match only; no nearest-version fallback.
    pub fn lookup(&self, route_template: &str, version: &ApiVersion) -> Option<&RouteRegistration<H>> {
        self.routes.get(route_template)?.get(version)
    }

    /// Versions registered for `route_template`, ascending. Empty when the
    /// template is unknown.
    pub fn list_versions(&self, route_template: &str) -> Vec<ApiVersion> {
        self.routes
            .get(route_template)
            .map(|versions| versions.values().map(|r| r.version.clone()).collect())
            .unwrap_or_default()
    }

    pub fn contains_template(&self, route_template: &str) -> bool {
        self.routes.contains_key(route_template)
    }

    /// Route templates in registration order.
    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Every registration, grouped by template.
    pub fn registrations(&self) -> impl Iterator<Item = &RouteRegistration<H>> {
        self.routes.values().flat_map(|versions| versions.values())
    }

    /// Distinct versions across all templates, ascending. A version counts as
    /// deprecated if any registration of it is.
    pub fn all_versions(&self) -> Vec<ApiVersion> {
        let mut versions: BTreeSet<ApiVersion> = BTreeSet::new();
        for registration in self.registrations() {
            let keep_existing = versions
                .get(&registration.version)
                .is_some_and(|existing| existing.is_deprecated() || !registration.is_deprecated());
            if !keep_existing {
                versions.replace(registration.version.clone());
            }
        }
        versions.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<H> Default for RouteRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
