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

//! Version readers.
//!
//! Each reader knows how to pull a raw version token out of one part of a
//! request. A [`ReaderChain`] runs all of them and returns every token it
//! found; picking a winner is left to the resolver.

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Where a version token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    Query,
    Header,
    MediaType,
    UrlSegment,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionSource::Query => "query",
            VersionSource::Header => "header",
            VersionSource::MediaType => "media_type",
            VersionSource::UrlSegment => "url_segment",
        };
        f.write_str(name)
    }
}

/// A strategy for extracting a version token from a request.
///
/// Configured in YAML as a tagged list:
///
/// ```yaml
/// readers:
///   - kind: query
///     name: api-version
///   - kind: header
///     name: X-Version
///   - kind: media_type
///     name: ver
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VersionReader {
    /// `?api-version=1.0`
    Query { name: String },
    /// `X-Version: 1.0`
    Header { name: String },
    /// `Accept: application/json;ver=1.0` (also read from `Content-Type`)
    MediaType { name: String },
    /// `/api/v1/...` where the route declares a `:version` parameter
    UrlSegment { name: String },
}

impl VersionReader {
    pub fn query(name: impl Into<String>) -> Self {
        Self::Query { name: name.into() }
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::Header { name: name.into() }
    }

    pub fn media_type(name: impl Into<String>) -> Self {
        Self::MediaType { name: name.into() }
    }

    pub fn url_segment(name: impl Into<String>) -> Self {
        Self::UrlSegment { name: name.into() }
    }

    pub fn source(&self) -> VersionSource {
        match self {
            VersionReader::Query { .. } => VersionSource::Query,
            VersionReader::Header { .. } => VersionSource::Header,
            VersionReader::MediaType { .. } => VersionSource::MediaType,
            VersionReader::UrlSegment { .. } => VersionSource::UrlSegment,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VersionReader::Query { name }
            | VersionReader::Header { name }
            | VersionReader::MediaType { name }
            | VersionReader::UrlSegment { name } => name,
        }
    }

    /// Append every token this reader finds in `request` to `out`.
    fn read_into(&self, request: &VersionRequest<'_>, out: &mut Vec<VersionCandidate>) {
        let mut push = |token: &str| {
            let token = token.trim();
            if !token.is_empty() {
                out.push(VersionCandidate {
                    token: token.to_string(),
                    source: self.source(),
                    parameter: self.name().to_string(),
                });
            }
        };

        match self {
            VersionReader::Query { name } => {
                if let Some(query) = request.query {
                    url::form_urlencoded::parse(query.as_bytes())
                        .filter(|(key, _)| key == name.as_str())
                        .for_each(|(_, value)| push(&*value));
                }
            }
            VersionReader::Header { name } => {
                request
                    .headers
                    .get_all(name.as_str())
                    .iter()
                    .filter_map(|value| value.to_str().ok())
                    .for_each(&mut push);
            }
            VersionReader::MediaType { name } => {
                for header_name in [header::ACCEPT, header::CONTENT_TYPE] {
                    for value in request.headers.get_all(&header_name) {
                        let Ok(value) = value.to_str() else {
                            continue;
                        };
                        for token in media_type_parameters(value, name) {
                            push(token);
                        }
                    }
                }
            }
            VersionReader::UrlSegment { name } => {
                if let Some(segment) = request.route_values.get(name) {
                    let segment = segment
                        .strip_prefix('v')
                        .or_else(|| segment.strip_prefix('V'))
                        .unwrap_or(segment);
                    push(segment);
                }
            }
        }
    }
}

/// Find the values of parameter `name` across a (possibly comma separated)
/// list of media types, e.g. `application/json;ver=2.0, text/plain`.
fn media_type_parameters<'a>(value: &'a str, name: &'a str) -> impl Iterator<Item = &'a str> {
    value.split(',').flat_map(move |media_type| {
        media_type.split(';').skip(1).filter_map(move |param| {
            let (key, val) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case(name) {
                Some(val.trim().trim_matches('"'))
            } else {
                None
            }
        })
    })
}

/// The parts of a request the readers look at.
#[derive(Debug, Clone, Copy)]
pub struct VersionRequest<'a> {
    pub query: Option<&'a str>,
    pub headers: &'a HeaderMap,
    pub route_values: &'a HashMap<String, String>,
}

impl<'a> VersionRequest<'a> {
    pub fn new(
        query: Option<&'a str>,
        headers: &'a HeaderMap,
        route_values: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            query,
            headers,
            route_values,
        }
    }
}

/// A raw, unparsed version token and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionCandidate {
    pub token: String,
    pub source: VersionSource,
    pub parameter: String,
}

impl fmt::Display for VersionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' from {} '{}'", self.token, self.source, self.parameter)
    }
}

/// Ordered list of readers. All readers run on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderChain {
    readers: Vec<VersionReader>,
}

impl ReaderChain {
    pub fn new(readers: Vec<VersionReader>) -> Self {
        Self { readers }
    }

    pub fn readers(&self) -> &[VersionReader] {
        &self.readers
    }

    /// Collect candidates from every reader, in reader order.
    pub fn read(&self, request: &VersionRequest<'_>) -> Vec<VersionCandidate> {
        let mut candidates = Vec::new();
        for reader in &self.readers {
            reader.read_into(request, &mut candidates);
        }
        candidates
    }
}

impl Default for ReaderChain {
    /// Query `api-version`, header `X-Version`, media type `ver`, URL segment `version`.
    fn default() -> Self {
        Self::new(vec![
            VersionReader::query("api-version"),
            VersionReader::header("X-Version"),
            VersionReader::media_type("ver"),
            VersionReader::url_segment("version"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for &(name, value) in pairs {
            map.append(name, HeaderValue::from_static(value));
        }
        map
    }

    fn tokens(candidates: &[VersionCandidate]) -> Vec<(&str, VersionSource)> {
        candidates
            .iter()
            .map(|c| (c.token.as_str(), c.source))
            .collect()
    }

    #[test]
    fn test_empty_request_yields_nothing() {
        let headers = HeaderMap::new();
        let route_values = HashMap::new();
        let request = VersionRequest::new(None, &headers, &route_values);
        assert!(ReaderChain::default().read(&request).is_empty());
    }

    #[test]
    fn test_query_reader() {
        let headers = HeaderMap::new();
        let route_values = HashMap::new();
        let request = VersionRequest::new(Some("foo=bar&api-version=2.0"), &headers, &route_values);

        let candidates = ReaderChain::default().read(&request);
        assert_eq!(tokens(&candidates), vec![("2.0", VersionSource::Query)]);
        assert_eq!(candidates[0].parameter, "api-version");
    }

    #[test]
    fn test_query_reader_ignores_other_keys_and_empty_values() {
        let headers = HeaderMap::new();
        let route_values = HashMap::new();
        let request =
            VersionRequest::new(Some("version=1.0&api-version="), &headers, &route_values);
        assert!(ReaderChain::default().read(&request).is_empty());
    }

    #[test]
    fn test_header_reader_is_case_insensitive() {
        let headers = headers(&[("x-version", "1.0")]);
        let route_values = HashMap::new();
        let request = VersionRequest::new(None, &headers, &route_values);
        assert_eq!(
            tokens(&ReaderChain::default().read(&request)),
            vec![("1.0", VersionSource::Header)]
        );
    }

    #[test]
    fn test_media_type_reader_reads_accept_and_content_type() {
        let headers = headers(&[
            ("accept", "text/plain, application/json; ver=2.0"),
            ("content-type", "application/json;VER=\"2.0\""),
        ]);
        let route_values = HashMap::new();
        let request = VersionRequest::new(None, &headers, &route_values);
        assert_eq!(
            tokens(&ReaderChain::default().read(&request)),
            vec![
                ("2.0", VersionSource::MediaType),
                ("2.0", VersionSource::MediaType)
            ]
        );
    }

    #[test]
    fn test_url_segment_reader_strips_prefix() {
        let headers = HeaderMap::new();
        let route_values = HashMap::from([("version".to_string(), "v2".to_string())]);
        let request = VersionRequest::new(None, &headers, &route_values);
        assert_eq!(
            tokens(&ReaderChain::default().read(&request)),
            vec![("2", VersionSource::UrlSegment)]
        );
    }

    #[test]
    fn test_all_readers_run_in_order() {
        let headers = headers(&[("x-version", "2.0"), ("accept", "application/json;ver=3.0")]);
        let route_values = HashMap::from([("version".to_string(), "v4".to_string())]);
        let request = VersionRequest::new(Some("api-version=1.0"), &headers, &route_values);

        assert_eq!(
            tokens(&ReaderChain::default().read(&request)),
            vec![
                ("1.0", VersionSource::Query),
                ("2.0", VersionSource::Header),
                ("3.0", VersionSource::MediaType),
                ("4", VersionSource::UrlSegment),
            ]
        );
    }

    #[test]
    fn test_chain_does_not_validate_tokens() {
        let headers = headers(&[("x-version", "garbage")]);
        let route_values = HashMap::new();
        let request = VersionRequest::new(None, &headers, &route_values);
        assert_eq!(
            tokens(&ReaderChain::default().read(&request)),
            vec![("garbage", VersionSource::Header)]
        );
    }

    #[test]
    fn test_reader_config_deserializes_from_yaml() {
        let yaml = r#"
- kind: query
  name: api-version
- kind: media_type
  name: ver
"#;
        let readers: Vec<VersionReader> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            readers,
            vec![
                VersionReader::query("api-version"),
                VersionReader::media_type("ver")
            ]
        );
    }
}
