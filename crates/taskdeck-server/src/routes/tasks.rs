use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use taskdeck_core::task::{CreateTask, Priority, Status, TaskFilter, UpdateTask};
use taskdeck_service::TaskService;

use super::{to_error, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/count-by-status", get(count_by_status))
        .route("/api/tasks/bulk-update", post(bulk_update))
        .route("/api/tasks/bulk-delete", post(bulk_delete))
}

#[derive(Debug, Deserialize)]
struct TaskQuery {
    project_id: Option<i64>,
    status: Option<String>,
    priority: Option<String>,
    assignee: Option<String>,
    limit: Option<i64>,
}

async fn list_tasks(
    State(state): State<AppState>,
    Query(q): Query<TaskQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let filter = TaskFilter {
        project_id: q.project_id,
        status: q.status.and_then(|s| Status::from_str(&s)),
        priority: q.priority.and_then(|p| Priority::from_str(&p)),
        assignee: q.assignee,
        limit: q.limit,
    };
    state
        .service
        .list_tasks(&filter)
        .await
        .map(|t| Json(json!(t)))
        .map_err(to_error)
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .get_task(id)
        .await
        .map(|t| Json(json!(t)))
        .map_err(to_error)
}

async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    state
        .service
        .create_task(&input)
        .await
        .map(|t| (StatusCode::CREATED, Json(json!(t))))
        .map_err(to_error)
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .update_task(id, &input)
        .await
        .map(|t| Json(json!(t)))
        .map_err(to_error)
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .service
        .delete_task(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(to_error)
}

#[derive(Debug, Deserialize)]
struct CountQuery {
    project_id: i64,
}

async fn count_by_status(
    State(state): State<AppState>,
    Query(q): Query<CountQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .count_tasks_by_status(q.project_id)
        .await
        .map(|c| Json(json!(c)))
        .map_err(to_error)
}

#[derive(Debug, Deserialize)]
struct BulkUpdateBody {
    ids: Vec<i64>,
    fields: UpdateTask,
}

/// Applies `fields` to every listed task. The response body carries only the
/// records that were actually updated; ids with no matching task are dropped,
/// not errored.
async fn bulk_update(
    State(state): State<AppState>,
    Json(body): Json<BulkUpdateBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .bulk_update_tasks(&body.ids, &body.fields)
        .await
        .map(|t| Json(json!(t)))
        .map_err(to_error)
}

#[derive(Debug, Deserialize)]
struct BulkDeleteBody {
    ids: Vec<i64>,
}

/// Deletes every listed task, answering with the ids that were removed.
async fn bulk_delete(
    State(state): State<AppState>,
    Json(body): Json<BulkDeleteBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .service
        .bulk_delete_tasks(&body.ids)
        .await
        .map(|deleted| Json(json!({ "deleted": deleted })))
        .map_err(to_error)
}
