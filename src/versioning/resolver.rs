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

//! Request version resolution.
//!
//! Resolution runs in three steps:
//!
//! 1. **Collecting** - every reader in the chain contributes candidates.
//! 2. **Reconciling** - candidates are parsed and collapsed to one version,
//!    falling back to the default when nothing was specified.
//! 3. **Resolved** - the chosen version is looked up exactly in the registry.
//!
//! Any step can end in a [`Rejection`]. Resolution is pure: no I/O, no locks.

use log::debug;

use super::error::{Ambiguity, Rejection};
use super::metadata::ResponseMetadata;
use super::reader::{ReaderChain, VersionCandidate, VersionRequest};
use super::registry::{RouteRegistration, RouteRegistry};
use super::version::ApiVersion;

/// The outcome of a successful resolution.
#[derive(Debug)]
pub struct Resolution<'r, H> {
    pub version: ApiVersion,
    pub registration: &'r RouteRegistration<H>,
    pub metadata: ResponseMetadata,
    /// True when no reader found a token and the default was used.
    pub defaulted: bool,
}

impl<'r, H> Resolution<'r, H> {
    pub fn handler(&self) -> &'r H {
        &self.registration.handler
    }
}

#[derive(Debug, Clone)]
pub struct VersionResolver {
    chain: ReaderChain,
    assume_default_when_unspecified: bool,
    default_version: ApiVersion,
}

impl VersionResolver {
    pub fn new(
        chain: ReaderChain,
        assume_default_when_unspecified: bool,
        default_version: ApiVersion,
    ) -> Self {
        Self {
            chain,
            assume_default_when_unspecified,
            default_version,
        }
    }

    pub fn chain(&self) -> &ReaderChain {
        &self.chain
    }

    pub fn default_version(&self) -> &ApiVersion {
        &self.default_version
    }

    pub fn assumes_default(&self) -> bool {
        self.assume_default_when_unspecified
    }

    /// Pick the handler registered for `route_template` at the version the
    /// request asks for.
    pub fn resolve<'r, H>(
        &self,
        route_template: &str,
        request: &VersionRequest<'_>,
        registry: &'r RouteRegistry<H>,
    ) -> Result<Resolution<'r, H>, Rejection> {
        let candidates = self.chain.read(request);
        let (version, defaulted) = self.reconcile(candidates)?;

        if !registry.contains_template(route_template) {
            return Err(Rejection::UnknownRoute {
                route: route_template.to_string(),
            });
        }

        let available = registry.list_versions(route_template);
        let registration = registry
            .lookup(route_template, &version)
            .ok_or_else(|| Rejection::UnsupportedVersion {
                requested: version.clone(),
                available: available.clone(),
            })?;

        let mut metadata = ResponseMetadata::for_route(&available);
        if registration.is_deprecated() {
            metadata.deprecated = true;
            metadata.sunset = registration.sunset.clone();
        }

        debug!(
            "Resolved '{route_template}' to API version {}{}",
            registration.version,
            if defaulted { " (default)" } else { "" }
        );

        Ok(Resolution {
            version: registration.version.clone(),
            registration,
            metadata,
            defaulted,
        })
    }

    /// Collapse the candidates to a single version.
    ///
    /// Malformed tokens are reported first, in reader order. Candidates that
    /// parse to the same version count once.
    pub fn reconcile(
        &self,
        candidates: Vec<VersionCandidate>,
    ) -> Result<(ApiVersion, bool), Rejection> {
        let mut parsed: Vec<(ApiVersion, VersionCandidate)> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match ApiVersion::parse(&candidate.token) {
                Ok(version) => parsed.push((version, candidate)),
                Err(error) => return Err(Rejection::MalformedVersion { candidate, error }),
            }
        }

        let Some((first, _)) = parsed.first() else {
            return if self.assume_default_when_unspecified {
                Ok((self.default_version.clone(), true))
            } else {
                Err(Rejection::AmbiguousVersion(Ambiguity::NoneSpecified))
            };
        };

        if parsed.iter().all(|(version, _)| version == first) {
            return Ok((first.clone(), false));
        }

        Err(Rejection::AmbiguousVersion(Ambiguity::Conflicting {
            candidates: parsed.into_iter().map(|(_, candidate)| candidate).collect(),
        }))
    }
}
