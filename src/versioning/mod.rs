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

//! Request-version resolution and routing.
//!
//! A request flows through the pieces in this order:
//!
//! ```text
//! ReaderChain ──► VersionResolver ──► RouteRegistry ──► Endpoint
//!  (candidates)    (one version)       (exact lookup)     (handler + metadata)
//! ```
//!
//! - [`version`] - the `ApiVersion` identifier and its parser
//! - [`reader`] - query, header, media type and URL segment readers
//! - [`registry`] - (route template, version) → handler bindings
//! - [`resolver`] - the precedence / tie-break / rejection policy
//! - [`metadata`] - reported-version response headers
//! - [`dispatch`] - axum mounting of the registry

pub mod dispatch;
pub mod error;
pub mod metadata;
pub mod reader;
pub mod registry;
pub mod resolver;
pub mod version;

pub use dispatch::{Endpoint, VersionedApi, VersionedApiBuilder};
pub use error::{Ambiguity, ConfigurationError, Rejection};
pub use metadata::ResponseMetadata;
pub use reader::{ReaderChain, VersionCandidate, VersionReader, VersionRequest, VersionSource};
pub use registry::{RouteRegistration, RouteRegistry};
pub use resolver::{Resolution, VersionResolver};
pub use version::{ApiVersion, VersionParseError};
