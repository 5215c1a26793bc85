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

//! Error types and error handling utilities shared by all handlers.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::StoreError;
use crate::versioning::{Ambiguity, Rejection};

/// Error codes for API responses
pub mod error_codes {
    pub const MALFORMED_API_VERSION: &str = "MALFORMED_API_VERSION";
    pub const AMBIGUOUS_API_VERSION: &str = "AMBIGUOUS_API_VERSION";
    pub const UNSUPPORTED_API_VERSION: &str = "UNSUPPORTED_API_VERSION";
    pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";

    pub const EMPLOYEE_NOT_FOUND: &str = "EMPLOYEE_NOT_FOUND";
    pub const TODO_NOT_FOUND: &str = "TODO_NOT_FOUND";

    pub const STORE_CONFLICT: &str = "STORE_CONFLICT";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Result type for handlers that fail with an [`ErrorResponse`].
pub type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

/// API error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetail>,
}

/// Additional error details
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Raw version token that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_version: Option<String>,
    /// Where the offending token was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_source: Option<String>,
    /// Versions the resource does support
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_versions: Option<Vec<String>>,
    /// Technical error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: ErrorDetail) -> Self {
        self.details = Some(details);
        self
    }

    /// Pair the response with the status code its error code maps to
    pub fn with_status(self) -> (StatusCode, Json<Self>) {
        let status = status_from_code(&self.code);
        (status, Json(self))
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, message)
    }
}

/// Convert an error code to an HTTP status code
fn status_from_code(code: &str) -> StatusCode {
    match code {
        error_codes::ROUTE_NOT_FOUND
        | error_codes::EMPLOYEE_NOT_FOUND
        | error_codes::TODO_NOT_FOUND => StatusCode::NOT_FOUND,

        error_codes::MALFORMED_API_VERSION
        | error_codes::AMBIGUOUS_API_VERSION
        | error_codes::UNSUPPORTED_API_VERSION
        | error_codes::INVALID_REQUEST => StatusCode::BAD_REQUEST,

        error_codes::STORE_CONFLICT => StatusCode::CONFLICT,

        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<Rejection> for ErrorResponse {
    fn from(rejection: Rejection) -> Self {
        let message = rejection.to_string();
        match rejection {
            Rejection::MalformedVersion { candidate, error } => {
                ErrorResponse::new(error_codes::MALFORMED_API_VERSION, message).with_details(
                    ErrorDetail {
                        requested_version: Some(candidate.token),
                        version_source: Some(format!("{} '{}'", candidate.source, candidate.parameter)),
                        technical_details: Some(error.to_string()),
                        ..Default::default()
                    },
                )
            }
            Rejection::AmbiguousVersion(Ambiguity::NoneSpecified) => {
                ErrorResponse::new(error_codes::AMBIGUOUS_API_VERSION, message)
            }
            Rejection::AmbiguousVersion(Ambiguity::Conflicting { candidates }) => {
                let found: Vec<String> = candidates.iter().map(ToString::to_string).collect();
                ErrorResponse::new(error_codes::AMBIGUOUS_API_VERSION, message).with_details(
                    ErrorDetail {
                        technical_details: Some(found.join("; ")),
                        ..Default::default()
                    },
                )
            }
            Rejection::UnsupportedVersion {
                requested,
                available,
            } => ErrorResponse::new(error_codes::UNSUPPORTED_API_VERSION, message).with_details(
                ErrorDetail {
                    requested_version: Some(requested.to_string()),
                    supported_versions: Some(available.iter().map(ToString::to_string).collect()),
                    ..Default::default()
                },
            ),
            Rejection::UnknownRoute { .. } => {
                ErrorResponse::new(error_codes::ROUTE_NOT_FOUND, message)
            }
        }
    }
}

impl From<StoreError> for ErrorResponse {
    fn from(err: StoreError) -> Self {
        ErrorResponse::new(error_codes::STORE_CONFLICT, err.to_string())
    }
}
