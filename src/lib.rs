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

pub mod api;
pub mod config;
pub mod logging;
pub mod server;
pub mod store;
pub mod versioning;

// Main exports for library users
pub use config::{
    ensure_config_file, load_config_file, load_or_create_config, save_config_file, ServerConfig,
};
pub use logging::init_logging;
pub use server::{build_app, Server};
pub use store::{DataStore, InMemoryDatabase};
pub use versioning::{ApiVersion, VersionedApi};
