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

//! The versioned team resource.
//!
//! Version 1.0 is deprecated but still served next to 2.0. The handlers are
//! placeholders.

use axum::extract::Extension;
use log::debug;

use crate::versioning::{ApiVersion, ConfigurationError, Endpoint, VersionedApiBuilder};

pub const GET_TEAM_TEMPLATE: &str = "team/GetTeam";
pub const TEAM_TEMPLATE: &str = "team";

const TAG: &str = "Team";

pub async fn get_team_v1() -> &'static str {
    "V1 Get to be implemented"
}

pub async fn get_team_v2() -> &'static str {
    "V2 Get to be implemented"
}

pub async fn create_team(Extension(version): Extension<ApiVersion>) -> &'static str {
    debug!("Creating team through API version {version}");
    "V1 Post to be implemented"
}

pub fn version_1() -> ApiVersion {
    ApiVersion::new(1, 0).deprecated()
}

pub fn version_2() -> ApiVersion {
    ApiVersion::new(2, 0)
}

/// Register every team endpoint.
pub fn register(api: &mut VersionedApiBuilder) -> Result<(), ConfigurationError> {
    api.route(
        GET_TEAM_TEMPLATE,
        version_1(),
        Endpoint::get("Get the team", TAG, get_team_v1),
    )?
    .route(
        GET_TEAM_TEMPLATE,
        version_2(),
        Endpoint::get("Get the team", TAG, get_team_v2),
    )?
    .route(
        TEAM_TEMPLATE,
        version_1(),
        Endpoint::post("Create a team", TAG, create_team),
    )?
    .route(
        TEAM_TEMPLATE,
        version_2(),
        Endpoint::post("Create a team", TAG, create_team),
    )?;
    Ok(())
}
