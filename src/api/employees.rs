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

//! Unversioned employee resource backed by a fixed list.
//!
//! Writes are validated and acknowledged but never stored.

use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use log::info;

use super::models::Employee;
use super::shared::{error_codes, ApiResult, ErrorResponse};

fn employees() -> Vec<Employee> {
    vec![
        Employee::new(1, "John", "Smith", "John.Smith@gmail.com"),
        Employee::new(2, "Jane", "Doe", "Jane.Doe@gmail.com"),
    ]
}

fn invalid(message: String) -> (StatusCode, Json<ErrorResponse>) {
    ErrorResponse::invalid_request(message).with_status()
}

/// Get all employees
#[utoipa::path(
    get,
    path = "/api/Employee",
    responses(
        (status = 200, description = "The list of all employees", body = [Employee]),
    ),
    tag = "Employee"
)]
pub async fn list_employees() -> Json<Vec<Employee>> {
    Json(employees())
}

/// Get an employee by id
#[utoipa::path(
    get,
    path = "/api/Employee/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "The employee", body = Employee),
        (status = 404, description = "No employee with this id", body = ErrorResponse),
    ),
    tag = "Employee"
)]
pub async fn get_employee(Path(id): Path<i32>) -> ApiResult<Json<Employee>> {
    employees()
        .into_iter()
        .find(|employee| employee.id == id)
        .map(Json)
        .ok_or_else(|| {
            ErrorResponse::new(
                error_codes::EMPLOYEE_NOT_FOUND,
                format!("Employee '{id}' not found"),
            )
            .with_status()
        })
}

/// Create an employee
///
/// Sample request:
///
/// ```text
/// POST /api/Employee
/// {
///   "firstName": "Mike",
///   "lastName": "Andrew",
///   "emailId": "Mike.Andrew@gmail.com"
/// }
/// ```
#[utoipa::path(
    post,
    path = "/api/Employee",
    request_body = Employee,
    responses(
        (status = 201, description = "Returns the newly created item", body = Employee),
        (status = 400, description = "If the item is invalid", body = ErrorResponse),
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    Json(employee): Json<Employee>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    employee.validate().map_err(invalid)?;
    info!("Accepted employee {:?}", employee.email_id);
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/api/Employee/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = Employee,
    responses(
        (status = 200, description = "Update accepted"),
        (status = 400, description = "If the item is invalid", body = ErrorResponse),
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    Path(id): Path<i32>,
    Json(employee): Json<Employee>,
) -> ApiResult<StatusCode> {
    employee.validate().map_err(invalid)?;
    info!("Accepted update of employee {id}");
    Ok(StatusCode::OK)
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/api/Employee/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Delete accepted"),
    ),
    tag = "Employee"
)]
pub async fn delete_employee(Path(id): Path<i32>) -> StatusCode {
    info!("Accepted delete of employee {id}");
    StatusCode::OK
}

pub fn router() -> Router {
    Router::new()
        .route("/api/Employee", get(list_employees).post(create_employee))
        .route(
            "/api/Employee/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}
