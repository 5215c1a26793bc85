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

//! Versioning error types.
//!
//! [`ConfigurationError`] is raised while the registry is being built and aborts
//! startup. [`Rejection`] is the per-request outcome of a failed resolution and
//! is always turned into a client error response.

use super::reader::{VersionCandidate, VersionSource};
use super::version::{ApiVersion, VersionParseError};

/// Startup-time configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("route '{route}' already has a handler registered for API version {version}")]
    DuplicateRegistration { route: String, version: ApiVersion },

    #[error("default API version '{token}' is malformed: {source}")]
    MalformedDefaultVersion {
        token: String,
        #[source]
        source: VersionParseError,
    },

    #[error("sunset hint key '{token}' is not a valid API version: {source}")]
    MalformedSunsetVersion {
        token: String,
        #[source]
        source: VersionParseError,
    },
}

/// Why no single version could be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ambiguity {
    /// No reader found a token and no default applies.
    NoneSpecified,
    /// Readers found tokens that parse to different versions.
    Conflicting { candidates: Vec<VersionCandidate> },
}

/// Request-time resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("API version {} is malformed: {error}", .candidate)]
    MalformedVersion {
        candidate: VersionCandidate,
        error: VersionParseError,
    },

    #[error("{}", ambiguity_message(.0))]
    AmbiguousVersion(Ambiguity),

    #[error("API version {requested} is not supported by this resource; supported versions: {}", join_versions(.available))]
    UnsupportedVersion {
        requested: ApiVersion,
        available: Vec<ApiVersion>,
    },

    #[error("no route matches '{route}'")]
    UnknownRoute { route: String },
}

impl Rejection {
    pub fn malformed_token(&self) -> Option<&str> {
        match self {
            Rejection::MalformedVersion { candidate, .. } => Some(&candidate.token),
            _ => None,
        }
    }

    pub fn candidate_source(&self) -> Option<VersionSource> {
        match self {
            Rejection::MalformedVersion { candidate, .. } => Some(candidate.source),
            _ => None,
        }
    }
}

fn ambiguity_message(ambiguity: &Ambiguity) -> String {
    match ambiguity {
        Ambiguity::NoneSpecified => {
            "an API version is required, but was not specified".to_string()
        }
        Ambiguity::Conflicting { candidates } => {
            let found: Vec<String> = candidates.iter().map(ToString::to_string).collect();
            format!(
                "the request specified conflicting API versions: {}",
                found.join(", ")
            )
        }
    }
}

pub(crate) fn join_versions(versions: &[ApiVersion]) -> String {
    versions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let unsupported = Rejection::UnsupportedVersion {
            requested: ApiVersion::new(3, 0),
            available: vec![ApiVersion::new(1, 0), ApiVersion::new(2, 0)],
        };
        assert_eq!(
            unsupported.to_string(),
            "API version 3.0 is not supported by this resource; supported versions: 1.0, 2.0"
        );

        let conflicting = Rejection::AmbiguousVersion(Ambiguity::Conflicting {
            candidates: vec![
                VersionCandidate {
                    token: "1.0".to_string(),
                    source: VersionSource::Query,
                    parameter: "api-version".to_string(),
                },
                VersionCandidate {
                    token: "2.0".to_string(),
                    source: VersionSource::Header,
                    parameter: "X-Version".to_string(),
                },
            ],
        });
        assert_eq!(
            conflicting.to_string(),
            "the request specified conflicting API versions: '1.0' from query 'api-version', '2.0' from header 'X-Version'"
        );
    }

    #[test]
    fn test_malformed_accessors() {
        let rejection = Rejection::MalformedVersion {
            candidate: VersionCandidate {
                token: "abc".to_string(),
                source: VersionSource::Header,
                parameter: "X-Version".to_string(),
            },
            error: VersionParseError::InvalidNumber("abc".to_string()),
        };
        assert_eq!(rejection.malformed_token(), Some("abc"));
        assert_eq!(rejection.candidate_source(), Some(VersionSource::Header));
        assert!(rejection.to_string().contains("'abc' from header 'X-Version'"));
    }
}
