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

//! REST API.
//!
//! ## API Structure
//!
//! ```text
//! /                                  - Greeting
//! /health                            - Health check
//! /api/versions                      - Versions served by versioned routes
//! /api/team/GetTeam                  - Team (versioned, GET)
//! /api/team                          - Team (versioned, POST)
//! /api/v{version}/team...            - Team with the version in the URL
//! /api/Employee[/{id}]               - Employees (unversioned)
//! /todoitems[/complete|/{id}]        - Todo items (unversioned)
//! /swagger                           - Swagger UI, one document per version group
//! ```
//!
//! ## Module Organization
//!
//! - `shared` - error type, common responses, operational handlers
//! - `models` - request/response bodies
//! - `team`, `employees`, `todos` - resources
//! - `openapi` - OpenAPI documents
//! - `routes` - router assembly

pub mod employees;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod shared;
pub mod team;
pub mod todos;

pub use openapi::{version_groups, versioned_openapi, ApiDoc};
pub use routes::{build_api_router, build_versioned_api};
pub use shared::error::*;
pub use shared::responses::*;
