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

//! OpenAPI documentation.
//!
//! [`ApiDoc`] describes the unversioned routes. [`versioned_openapi`] extends
//! it with the registrations of one version group, so each group gets its own
//! document at `/swagger/{group}/swagger.json`.

use axum::http::Method;
use utoipa::openapi::path::{OperationBuilder, PathItem, PathItemType};
use utoipa::openapi::{Deprecated, OpenApi as OpenApiDoc, ResponseBuilder};
use utoipa::{Modify, OpenApi};

use super::models::{Employee, Todo};
use super::shared::{ApiVersionInfo, ApiVersionsResponse, ErrorDetail, ErrorResponse, HealthResponse};
use crate::versioning::{ApiVersion, Endpoint, RouteRegistry};

#[derive(OpenApi)]
#[openapi(
    modifiers(&TermsOfService),
    paths(
        super::shared::handlers::root,
        super::shared::handlers::health_check,
        super::shared::handlers::list_api_versions,
        super::employees::list_employees,
        super::employees::get_employee,
        super::employees::create_employee,
        super::employees::update_employee,
        super::employees::delete_employee,
        super::todos::get_all_todos,
        super::todos::get_complete_todos,
        super::todos::get_todo,
        super::todos::create_todo,
        super::todos::update_todo,
        super::todos::delete_todo,
    ),
    components(
        schemas(
            Employee,
            Todo,
            HealthResponse,
            ApiVersionInfo,
            ApiVersionsResponse,
            ErrorResponse,
            ErrorDetail,
        )
    ),
    tags(
        (name = "API", description = "API version information"),
        (name = "Health", description = "Health check endpoints"),
        (name = "Employee", description = "Employee records"),
        (name = "Todo", description = "Todo items"),
        (name = "Team", description = "Versioned team resource"),
    ),
    info(
        title = "Base Template for Web API",
        version = "1.0.0",
        description = "A Web API to validate Swagger and API versioning.\n\n## API Versioning\n\nVersioned resources read the requested version from the `api-version` query parameter, the `X-Version` header, the `ver` media type parameter or the `/api/v{version}/` URL segment. Requests that name no version are served by the default version.",
        contact(
            name = "Abdul",
            email = "a@a.com",
            url = "https://example.website.com/"
        ),
        license(
            name = "Web API License",
            url = "https://example.com/license"
        )
    )
)]
pub struct ApiDoc;

const TERMS_OF_SERVICE: &str = "https://example.com/terms";

struct TermsOfService;

impl Modify for TermsOfService {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        openapi.info.terms_of_service = Some(TERMS_OF_SERVICE.to_string());
    }
}

/// Documentation group names of every registered version, ascending.
pub fn version_groups<H>(registry: &RouteRegistry<H>) -> Vec<String> {
    registry
        .all_versions()
        .iter()
        .map(ApiVersion::group_name)
        .collect()
}

/// The OpenAPI document for one version group.
///
/// Starts from [`ApiDoc`] and adds one operation per registration whose
/// version belongs to `group`, under `{prefix}/v{version}/{template}`.
/// Returns `None` for an unknown group.
pub fn versioned_openapi(
    registry: &RouteRegistry<Endpoint>,
    prefix: &str,
    group: &str,
) -> Option<OpenApiDoc> {
    let version = registry
        .all_versions()
        .into_iter()
        .find(|version| version.group_name() == group)?;

    let mut doc = ApiDoc::openapi();
    doc.info.version = version.to_string();
    doc.info.title = format!("{} {}", doc.info.title, group);
    if version.is_deprecated() {
        let description = doc.info.description.take().unwrap_or_default();
        doc.info.description = Some(format!(
            "{description}\n\n**This API version has been deprecated.**"
        ));
    }

    for registration in registry.registrations().filter(|r| r.version == version) {
        let endpoint = &registration.handler;
        let Some(item_type) = path_item_type(endpoint.method()) else {
            continue;
        };

        let path = format!(
            "{prefix}/v{}/{}",
            registration.version.url_segment(),
            registration.route_template
        );
        let operation_id = format!(
            "{}_{}_{}",
            endpoint.method().as_str().to_lowercase(),
            registration.route_template.replace('/', "_"),
            group
        );

        let mut operation = OperationBuilder::new()
            .summary(Some(endpoint.summary()))
            .operation_id(Some(operation_id))
            .tag(endpoint.tag())
            .response("200", ResponseBuilder::new().description("Success").build())
            .response(
                "400",
                ResponseBuilder::new()
                    .description("Malformed, ambiguous or unsupported API version")
                    .build(),
            );
        if registration.is_deprecated() {
            operation = operation.deprecated(Some(Deprecated::True));
        }
        let operation = operation.build();

        match doc.paths.paths.get_mut(&path) {
            Some(item) => {
                item.operations.insert(item_type, operation);
            }
            None => {
                doc.paths.paths.insert(path, PathItem::new(item_type, operation));
            }
        }
    }

    Some(doc)
}

fn path_item_type(method: &Method) -> Option<PathItemType> {
    [
        (Method::GET, PathItemType::Get),
        (Method::POST, PathItemType::Post),
        (Method::PUT, PathItemType::Put),
        (Method::DELETE, PathItemType::Delete),
        (Method::PATCH, PathItemType::Patch),
        (Method::HEAD, PathItemType::Head),
        (Method::OPTIONS, PathItemType::Options),
    ]
    .into_iter()
    .find_map(|(candidate, item_type)| (candidate == *method).then_some(item_type))
}
