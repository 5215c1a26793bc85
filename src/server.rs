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

use anyhow::{Context, Result};
use axum::Router;
use log::{debug, info, warn};
use std::future::Future;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{self, todos::TodoDb};
use crate::config::ServerConfig;
use crate::versioning::VersionedApi;

/// Path of the OpenAPI document for a version group.
pub fn openapi_path(group: &str) -> String {
    format!("/swagger/{group}/swagger.json")
}

/// Assemble the application router for `config`.
///
/// Fails when the versioning settings cannot produce a resolver or when two
/// handlers claim the same route and version.
pub fn build_app(config: &ServerConfig, todos: TodoDb) -> Result<Router> {
    let versioned = api::build_versioned_api(&config.versioning)
        .context("Failed to register versioned routes")?;

    let mut app = api::build_api_router(&versioned, todos);

    if config.enable_docs {
        app = app.merge(swagger_ui(&versioned));
    }

    if let Some(dir) = &config.static_dir {
        if !dir.is_dir() {
            warn!("Static file directory '{}' does not exist", dir.display());
        }
        app = app.fallback_service(ServeDir::new(dir));
    }

    Ok(app.layer(CorsLayer::permissive()))
}

/// Swagger UI at `/swagger` with one document per version group.
fn swagger_ui(versioned: &VersionedApi) -> SwaggerUi {
    let registry = versioned.registry();
    api::version_groups(registry)
        .into_iter()
        .filter_map(|group| {
            let doc = api::versioned_openapi(registry, versioned.prefix(), &group)?;
            Some((openapi_path(&group), doc))
        })
        .fold(SwaggerUi::new("/swagger"), |ui, (path, doc)| {
            debug!("Serving OpenAPI document at {path}");
            ui.url(path, doc)
        })
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    todos: TodoDb,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            todos: TodoDb::new(),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes, then drain in-flight requests.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = build_app(&self.config, self.todos.clone())?;
        let addr = self.address();

        info!("Starting web API on {addr}");
        if self.config.enable_docs {
            info!("Swagger UI available at http://{addr}/swagger/");
        }
        if let Some(dir) = &self.config.static_dir {
            info!("Serving static files from {}", dir.display());
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Web API server error")?;

        info!("Web API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_swagger_documents_per_group() {
        let app = build_app(&ServerConfig::default(), TodoDb::new()).unwrap();

        for group in ["v1", "v2"] {
            let response = app
                .clone()
                .oneshot(
                    Request::get(openapi_path(group))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "group {group}");
        }
    }

    #[tokio::test]
    async fn test_docs_disabled() {
        let config = ServerConfig {
            enable_docs: false,
            ..Default::default()
        };
        let app = build_app(&config, TodoDb::new()).unwrap();

        let response = app
            .oneshot(Request::get(openapi_path("v1")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_files_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.txt"), "static content").unwrap();

        let config = ServerConfig {
            static_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let app = build_app(&config, TodoDb::new()).unwrap();

        let response = app
            .clone()
            .oneshot(Request::get("/index.txt").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        };
        Server::new(config).run_until(async {}).await.unwrap();
    }
}
