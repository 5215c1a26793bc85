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

//! Route assembly.

use axum::{extract::Extension, routing::get, Router};

use super::shared::handlers;
use super::todos::TodoDb;
use super::{employees, team, todos};
use crate::config::VersioningSettings;
use crate::versioning::{ConfigurationError, VersionedApi};

/// Register every versioned resource under the configured resolution policy.
pub fn build_versioned_api(settings: &VersioningSettings) -> Result<VersionedApi, ConfigurationError> {
    let mut builder = VersionedApi::builder(settings.resolver()?)
        .with_report_api_versions(settings.report_api_versions)
        .with_sunset_hints(settings.sunset_hints()?);

    team::register(&mut builder)?;

    Ok(builder.build())
}

/// The full API router: operational routes, versioned resources, employees
/// and todo items.
pub fn build_api_router(api: &VersionedApi, todos: TodoDb) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/versions", get(handlers::list_api_versions))
        .merge(api.router())
        .merge(employees::router())
        .merge(todos::router(todos))
        .layer(Extension(api.clone()))
}
