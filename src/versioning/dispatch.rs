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

//! axum integration for versioned routes.
//!
//! Every route template in the registry is mounted twice:
//!
//! ```text
//! {prefix}/{template}              version from query, header or media type
//! {prefix}/:version/{template}     version also taken from the URL segment
//! ```
//!
//! Both mounts land in the same dispatcher, which resolves the version, runs
//! the registered [`Endpoint`] and stamps the reported-version headers on the
//! response.

use axum::{
    extract::{Path, Request},
    handler::Handler,
    http::Method,
    response::{IntoResponse, Response},
    routing::{self, MethodRouter},
    Router,
};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tower::ServiceExt;

use super::error::{ConfigurationError, Rejection};
use super::metadata::ResponseMetadata;
use super::reader::{VersionReader, VersionRequest};
use super::registry::RouteRegistry;
use super::resolver::VersionResolver;
use super::version::ApiVersion;
use crate::api::shared::ErrorResponse;

/// A single-method handler bound to one (template, version) pair.
#[derive(Clone)]
pub struct Endpoint {
    method: Method,
    summary: String,
    tag: String,
    route: MethodRouter,
}

impl Endpoint {
    pub fn new(method: Method, summary: impl Into<String>, tag: impl Into<String>, route: MethodRouter) -> Self {
        Self {
            method,
            summary: summary.into(),
            tag: tag.into(),
            route,
        }
    }

    pub fn get<H, T>(summary: impl Into<String>, tag: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::new(Method::GET, summary, tag, routing::get(handler))
    }

    pub fn post<H, T>(summary: impl Into<String>, tag: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::new(Method::POST, summary, tag, routing::post(handler))
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("summary", &self.summary)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Collects registrations and the resolution policy, then freezes them into
/// a [`VersionedApi`].
#[derive(Debug)]
pub struct VersionedApiBuilder {
    prefix: String,
    resolver: VersionResolver,
    report_api_versions: bool,
    sunset_hints: HashMap<ApiVersion, String>,
    registry: RouteRegistry<Endpoint>,
}

impl VersionedApiBuilder {
    pub fn new(resolver: VersionResolver) -> Self {
        Self {
            prefix: "/api".to_string(),
            resolver,
            report_api_versions: true,
            sunset_hints: HashMap::new(),
            registry: RouteRegistry::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_report_api_versions(mut self, report: bool) -> Self {
        self.report_api_versions = report;
        self
    }

    /// Sunset hints attached to deprecated registrations of the given versions.
    pub fn with_sunset_hints(mut self, hints: HashMap<ApiVersion, String>) -> Self {
        self.sunset_hints = hints;
        self
    }

    /// Register `endpoint` for `(template, version)`.
    pub fn route(
        &mut self,
        template: &str,
        version: ApiVersion,
        endpoint: Endpoint,
    ) -> Result<&mut Self, ConfigurationError> {
        let sunset = if version.is_deprecated() {
            self.sunset_hints.get(&version).cloned()
        } else {
            None
        };
        self.registry
            .register_with_sunset(template.trim_matches('/'), version, sunset, endpoint)?;
        Ok(self)
    }

    pub fn build(self) -> VersionedApi {
        VersionedApi {
            inner: Arc::new(Inner {
                prefix: self.prefix,
                resolver: self.resolver,
                report_api_versions: self.report_api_versions,
                registry: self.registry,
            }),
        }
    }
}

struct Inner {
    prefix: String,
    resolver: VersionResolver,
    report_api_versions: bool,
    registry: RouteRegistry<Endpoint>,
}

/// The frozen set of versioned routes. Cheap to clone.
#[derive(Clone)]
pub struct VersionedApi {
    inner: Arc<Inner>,
}

impl VersionedApi {
    pub fn builder(resolver: VersionResolver) -> VersionedApiBuilder {
        VersionedApiBuilder::new(resolver)
    }

    pub fn registry(&self) -> &RouteRegistry<Endpoint> {
        &self.inner.registry
    }

    pub fn resolver(&self) -> &VersionResolver {
        &self.inner.resolver
    }

    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    pub fn reports_api_versions(&self) -> bool {
        self.inner.report_api_versions
    }

    /// Name of the route parameter read by the URL-segment reader, if the
    /// chain has one.
    pub fn url_segment_parameter(&self) -> Option<&str> {
        self.inner
            .resolver
            .chain()
            .readers()
            .iter()
            .find_map(|reader| match reader {
                VersionReader::UrlSegment { name } => Some(name.as_str()),
                _ => None,
            })
    }

    /// Unversioned URL for a template, e.g. `/api/team/GetTeam`.
    pub fn path_for(&self, template: &str) -> String {
        format!("{}/{}", self.inner.prefix, template)
    }

    /// Build the axum router for every registered template.
    pub fn router(&self) -> Router {
        let mut router = Router::new();
        let segment = self.url_segment_parameter().map(str::to_string);

        for template in self.inner.registry.templates() {
            let handler = {
                let api = self.clone();
                let template = template.to_string();
                move |route_values: Option<Path<HashMap<String, String>>>, request: Request| {
                    let api = api.clone();
                    let template = template.clone();
                    async move {
                        let route_values = route_values.map(|Path(values)| values).unwrap_or_default();
                        api.dispatch(&template, route_values, request).await
                    }
                }
            };

            router = router.route(&self.path_for(template), routing::any(handler.clone()));
            if let Some(segment) = &segment {
                let versioned = format!("{}/:{}/{}", self.inner.prefix, segment, template);
                router = router.route(&versioned, routing::any(handler));
            }
        }
        router
    }

    /// Resolve the version for `template` and run the matching endpoint.
    pub async fn dispatch(
        &self,
        template: &str,
        route_values: HashMap<String, String>,
        mut request: Request,
    ) -> Response {
        let resolved = {
            let view = VersionRequest::new(request.uri().query(), request.headers(), &route_values);
            self.inner
                .resolver
                .resolve(template, &view, &self.inner.registry)
                .map(|resolution| {
                    (
                        resolution.handler().route.clone(),
                        resolution.version,
                        resolution.metadata,
                    )
                })
        };

        let (route, version, metadata) = match resolved {
            Ok(resolved) => resolved,
            Err(rejection) => return self.reject(template, rejection),
        };

        request.extensions_mut().insert(version);
        let mut response = match route.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        metadata.apply(response.headers_mut(), self.inner.report_api_versions);
        response
    }

    fn reject(&self, template: &str, rejection: Rejection) -> Response {
        debug!("Rejected request for '{template}': {rejection}");

        let reported = match &rejection {
            Rejection::UnsupportedVersion { available, .. } if self.inner.report_api_versions => {
                Some(ResponseMetadata::for_route(available))
            }
            _ => None,
        };

        let mut response = ErrorResponse::from(rejection).with_status().into_response();
        if let Some(metadata) = reported {
            metadata.apply(response.headers_mut(), true);
        }
        response
    }
}
