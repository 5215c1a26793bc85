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

//! API version identifier.
//!
//! An [`ApiVersion`] is a `major.minor` pair with an optional status tag
//! (`2.0-beta`). The deprecation flag rides along as metadata and never takes
//! part in equality, hashing or ordering.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A client-visible API revision.
#[derive(Debug, Clone)]
pub struct ApiVersion {
    major: u32,
    minor: u32,
    status: Option<String>,
    deprecated: bool,
}

impl ApiVersion {
    /// Create a `major.minor` version without status.
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            status: None,
            deprecated: false,
        }
    }

    /// Attach a status tag, e.g. `beta`.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Mark this version as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Parse a raw token (`"1"`, `"1.0"`, `"2.1-beta"`).
    pub fn parse(token: &str) -> Result<Self, VersionParseError> {
        token.parse()
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Canonical `major.minor` form used on the wire. The status tag is left out.
    pub fn to_wire_string(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// The `VVV` part of a group name: major, `.minor` unless zero, `-status`
    /// when present. Substituted for `{version}` in URL templates.
    pub fn url_segment(&self) -> String {
        let mut out = self.major.to_string();
        if self.minor != 0 {
            out.push_str(&format!(".{}", self.minor));
        }
        if let Some(status) = &self.status {
            out.push('-');
            out.push_str(status);
        }
        out
    }

    /// Documentation group name in `'v'VVV` form (`v1`, `v1.1`, `v2-beta`).
    pub fn group_name(&self) -> String {
        format!("v{}", self.url_segment())
    }
}

impl PartialEq for ApiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major && self.minor == other.minor && self.status == other.status
    }
}

impl Eq for ApiVersion {}

impl Hash for ApiVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.status.hash(state);
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Option orders None before Some, which is exactly the status rule.
        (self.major, self.minor, &self.status).cmp(&(other.major, other.minor, &other.status))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(status) = &self.status {
            write!(f, "-{status}")?;
        }
        Ok(())
    }
}

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let (numbers, status) = match token.split_once('-') {
            Some((numbers, status)) => {
                if status.is_empty() || !status.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(VersionParseError::InvalidStatus(status.to_string()));
                }
                (numbers, Some(status.to_string()))
            }
            None => (token, None),
        };

        let mut parts = numbers.split('.');
        let major = parse_component(parts.next())?;
        let minor = match parts.next() {
            Some(minor) => parse_component(Some(minor))?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(VersionParseError::InvalidFormat(token.to_string()));
        }

        Ok(Self {
            major,
            minor,
            status,
            deprecated: false,
        })
    }
}

fn parse_component(part: Option<&str>) -> Result<u32, VersionParseError> {
    let part = part.unwrap_or_default();
    // u32::from_str accepts a leading '+', which is not a valid version digit.
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(VersionParseError::InvalidNumber(part.to_string()));
    }
    part.parse()
        .map_err(|_| VersionParseError::InvalidNumber(part.to_string()))
}

impl Serialize for ApiVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Why a version token could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,

    #[error("invalid number '{0}' in version")]
    InvalidNumber(String),

    #[error("invalid version format '{0}'")]
    InvalidFormat(String),

    #[error("invalid status tag '{0}'")]
    InvalidStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;

    #[test_case("1", 1, 0, None ; "major only")]
    #[test_case("1.0", 1, 0, None ; "major minor")]
    #[test_case("2.5", 2, 5, None ; "non zero minor")]
    #[test_case("2.0-beta", 2, 0, Some("beta") ; "with status")]
    #[test_case("3-rc1", 3, 0, Some("rc1") ; "major with status")]
    #[test_case(" 1.2 ", 1, 2, None ; "surrounding whitespace")]
    fn test_parse_valid(token: &str, major: u32, minor: u32, status: Option<&str>) {
        let version = ApiVersion::parse(token).unwrap();
        assert_eq!(version.major(), major);
        assert_eq!(version.minor(), minor);
        assert_eq!(version.status(), status);
        assert!(!version.is_deprecated());
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    #[test_case("x" ; "letters")]
    #[test_case("-1" ; "negative")]
    #[test_case("+1" ; "plus sign")]
    #[test_case("1.2.3" ; "three components")]
    #[test_case("1." ; "dangling dot")]
    #[test_case("v1" ; "v prefix")]
    #[test_case("1.0-" ; "empty status")]
    #[test_case("1.0-be ta" ; "status with space")]
    fn test_parse_invalid(token: &str) {
        assert!(ApiVersion::parse(token).is_err());
    }

    #[test]
    fn test_empty_token_error_kind() {
        assert_eq!(ApiVersion::parse(""), Err(VersionParseError::Empty));
    }

    #[test]
    fn test_ordering() {
        assert!(ApiVersion::new(1, 0) < ApiVersion::new(2, 0));
        assert!(ApiVersion::new(1, 0) < ApiVersion::new(1, 1));
        assert!(ApiVersion::new(1, 0) < ApiVersion::new(1, 0).with_status("alpha"));
        assert!(
            ApiVersion::new(1, 0).with_status("alpha") < ApiVersion::new(1, 0).with_status("beta")
        );
        assert!(ApiVersion::new(1, 9).with_status("rc") < ApiVersion::new(2, 0));
    }

    #[test]
    fn test_deprecation_is_not_identity() {
        let plain = ApiVersion::new(1, 0);
        let deprecated = ApiVersion::new(1, 0).deprecated();
        assert_eq!(plain, deprecated);
        assert_eq!(plain.cmp(&deprecated), Ordering::Equal);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(!set.insert(deprecated));
    }

    #[test]
    fn test_wire_string_round_trip() {
        for token in ["1", "1.0", "4.2", "2.0-beta"] {
            let parsed = ApiVersion::parse(token).unwrap();
            let reparsed = ApiVersion::parse(&parsed.to_wire_string()).unwrap();
            assert_eq!(reparsed.major(), parsed.major());
            assert_eq!(reparsed.minor(), parsed.minor());
        }
        // Without a status the canonical form is a fixed point.
        let parsed = ApiVersion::parse("3").unwrap();
        assert_eq!(ApiVersion::parse(&parsed.to_wire_string()).unwrap(), parsed);
    }

    #[test]
    fn test_display_includes_status() {
        assert_eq!(ApiVersion::new(1, 0).to_string(), "1.0");
        assert_eq!(ApiVersion::new(2, 0).with_status("beta").to_string(), "2.0-beta");
        assert_eq!(ApiVersion::new(2, 0).with_status("beta").to_wire_string(), "2.0");
    }

    #[test]
    fn test_group_name() {
        assert_eq!(ApiVersion::new(1, 0).group_name(), "v1");
        assert_eq!(ApiVersion::new(1, 1).group_name(), "v1.1");
        assert_eq!(ApiVersion::new(2, 0).with_status("beta").group_name(), "v2-beta");
        assert_eq!(ApiVersion::new(2, 0).url_segment(), "2");
    }

    #[test]
    fn test_serde_uses_display_form() {
        let json = serde_json::to_string(&ApiVersion::new(2, 1)).unwrap();
        assert_eq!(json, "\"2.1\"");
        let back: ApiVersion = serde_json::from_str("\"1.0-beta\"").unwrap();
        assert_eq!(back, ApiVersion::new(1, 0).with_status("beta"));
        assert!(serde_json::from_str::<ApiVersion>("\"nope\"").is_err());
    }
}
