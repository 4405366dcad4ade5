pub mod health;
pub mod projects;
pub mod tasks;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::{json, Value};
use taskdeck_service::MemoryService;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MemoryService>,
}

pub fn build_router(service: Arc<MemoryService>) -> Router {
    let state = AppState { service };
    Router::new()
        .merge(health::routes())
        .merge(projects::routes())
        .merge(tasks::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub(crate) fn to_error(e: taskdeck_service::ServiceError) -> (StatusCode, Json<Value>) {
    let (status, msg) = match &e {
        taskdeck_service::ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        taskdeck_service::ServiceError::InvalidInput(_) => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        taskdeck_service::ServiceError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    };
    (status, Json(json!({ "error": msg })))
}
