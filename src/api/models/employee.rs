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

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An employee record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
#[schema(example = json!({
    "id": 0,
    "firstName": "Mike",
    "lastName": "Andrew",
    "emailId": "Mike.Andrew@gmail.com"
}))]
pub struct Employee {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Required on create and update
    pub email_id: Option<String>,
}

impl Employee {
    pub fn new(id: i32, first_name: &str, last_name: &str, email_id: &str) -> Self {
        Self {
            id,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email_id: Some(email_id.to_string()),
        }
    }

    /// Check the fields a client must supply on write.
    pub fn validate(&self) -> Result<(), String> {
        match self.email_id.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Ok(()),
            _ => Err("The EmailId field is required.".to_string()),
        }
    }
}
