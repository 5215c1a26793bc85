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

//! Todo items, grouped under `/todoitems` and backed by the in-memory store.
//!
//! Every handler opens its own store session; nothing it stages is visible
//! to other requests until `save_changes` succeeds.

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use log::{info, warn};

use super::models::Todo;
use super::shared::{error_codes, ApiResult, ErrorResponse};
use crate::store::{DataStore, InMemoryDatabase};

pub type TodoDb = InMemoryDatabase<Todo>;

fn not_found(id: i64) -> (StatusCode, Json<ErrorResponse>) {
    ErrorResponse::new(error_codes::TODO_NOT_FOUND, format!("Todo '{id}' not found")).with_status()
}

async fn commit(session: &mut impl DataStore<Todo>) -> ApiResult<usize> {
    session.save_changes().await.map_err(|e| {
        warn!("Failed to save todo changes: {e}");
        ErrorResponse::from(e).with_status()
    })
}

/// List all todo items
#[utoipa::path(
    get,
    path = "/todoitems",
    responses(
        (status = 200, description = "All todo items", body = [Todo]),
    ),
    tag = "Todo"
)]
pub async fn get_all_todos(Extension(db): Extension<TodoDb>) -> Json<Vec<Todo>> {
    Json(db.session().find_all().await)
}

/// List completed todo items
#[utoipa::path(
    get,
    path = "/todoitems/complete",
    responses(
        (status = 200, description = "Completed todo items", body = [Todo]),
    ),
    tag = "Todo"
)]
pub async fn get_complete_todos(Extension(db): Extension<TodoDb>) -> Json<Vec<Todo>> {
    let todos = db.session().find_all().await;
    Json(todos.into_iter().filter(|todo| todo.is_complete).collect())
}

/// Get a todo item by id
#[utoipa::path(
    get,
    path = "/todoitems/{id}",
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo item", body = Todo),
        (status = 404, description = "No todo item with this id", body = ErrorResponse),
    ),
    tag = "Todo"
)]
pub async fn get_todo(
    Extension(db): Extension<TodoDb>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Todo>> {
    db.session()
        .find_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create a todo item
#[utoipa::path(
    post,
    path = "/todoitems",
    request_body = Todo,
    responses(
        (status = 201, description = "Created; Location points at the new item", body = Todo),
    ),
    tag = "Todo"
)]
pub async fn create_todo(
    Extension(db): Extension<TodoDb>,
    Json(todo): Json<Todo>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<Todo>)> {
    let mut session = db.session();
    let todo = session.add(todo);
    commit(&mut session).await?;

    info!("Created todo {}", todo.id);
    let location = format!("/todoitems/{}", todo.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(todo)))
}

/// Update a todo item
#[utoipa::path(
    put,
    path = "/todoitems/{id}",
    params(("id" = i64, Path, description = "Todo id")),
    request_body = Todo,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "No todo item with this id", body = ErrorResponse),
    ),
    tag = "Todo"
)]
pub async fn update_todo(
    Extension(db): Extension<TodoDb>,
    Path(id): Path<i64>,
    Json(input): Json<Todo>,
) -> ApiResult<StatusCode> {
    let mut session = db.session();
    let mut todo = session.find_by_id(id).await.ok_or_else(|| not_found(id))?;

    todo.name = input.name;
    todo.is_complete = input.is_complete;
    session.update(todo);
    commit(&mut session).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a todo item
#[utoipa::path(
    delete,
    path = "/todoitems/{id}",
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No todo item with this id", body = ErrorResponse),
    ),
    tag = "Todo"
)]
pub async fn delete_todo(
    Extension(db): Extension<TodoDb>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut session = db.session();
    if session.find_by_id(id).await.is_none() {
        return Err(not_found(id));
    }

    session.remove(id);
    commit(&mut session).await?;
    info!("Deleted todo {id}");
    Ok(StatusCode::NO_CONTENT)
}

pub fn router(db: TodoDb) -> Router {
    let items = Router::new()
        .route("/", get(get_all_todos).post(create_todo))
        .route("/complete", get(get_complete_todos))
        .route("/:id", get(get_todo).put(update_todo).delete(delete_todo));

    Router::new()
        .nest("/todoitems", items)
        .layer(Extension(db))
}
