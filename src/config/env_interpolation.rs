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

//! Environment variable interpolation for configuration files.
//!
//! - `${VAR_NAME}` - replaced by the variable; an error when unset
//! - `${VAR_NAME:-default}` - `default` when the variable is unset or empty
//!
//! ```
//! use versioned_api_server::config::env_interpolation::interpolate;
//!
//! std::env::set_var("DOC_PORT", "9090");
//! let result = interpolate("port: ${DOC_PORT}\nhost: ${DOC_HOST_UNSET:-0.0.0.0}").unwrap();
//! assert_eq!(result, "port: 9090\nhost: 0.0.0.0");
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::env;

/// Upper bound on the interpolated output.
const MAX_INTERPOLATED_LENGTH: usize = 1_000_000;

lazy_static! {
    /// `${NAME}` or `${NAME:-default}`; names follow POSIX rules.
    static ref ENV_VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("Invalid regex pattern");
}

#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Environment variable '{name}' does not contain valid Unicode")]
    NotUnicode { name: String },

    #[error("Interpolated result exceeds maximum allowed length of {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Replace every variable reference in `input`. No recursive expansion.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut result = String::with_capacity(input.len());
    let mut last_end = 0;
    let mut used = Vec::new();

    for caps in ENV_VAR_PATTERN.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();

        result.push_str(&input[last_end..whole.start()]);
        result.push_str(&resolve(name, &caps)?);
        last_end = whole.end();
        used.push(name);

        if result.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }
    result.push_str(&input[last_end..]);

    if !used.is_empty() {
        // Names only; values may be secrets.
        debug!("Interpolated environment variables: {}", used.join(", "));
    }
    Ok(result)
}

fn resolve(name: &str, caps: &Captures<'_>) -> Result<String, InterpolationError> {
    let default = caps.get(3).map(|m| m.as_str());
    match (env::var(name), default) {
        (Ok(value), None) => Ok(value),
        (Ok(value), Some(default)) => Ok(if value.is_empty() { default.to_string() } else { value }),
        (Err(env::VarError::NotPresent), Some(default)) => Ok(default.to_string()),
        (Err(env::VarError::NotPresent), None) => Err(InterpolationError::MissingVariable {
            name: name.to_string(),
        }),
        (Err(env::VarError::NotUnicode(_)), _) => Err(InterpolationError::NotUnicode {
            name: name.to_string(),
        }),
    }
}
