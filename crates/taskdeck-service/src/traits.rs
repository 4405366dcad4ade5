use async_trait::async_trait;
use taskdeck_core::project::{CreateProject, Project, UpdateProject};
use taskdeck_core::task::{CreateTask, Task, TaskFilter, UpdateTask};
use taskdeck_core::TaskdeckError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TaskdeckError> for ServiceError {
    fn from(e: TaskdeckError) -> Self {
        match e {
            TaskdeckError::NotFound(msg) => ServiceError::NotFound(msg),
            TaskdeckError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
        }
    }
}

/// Abstraction over the external record store.
///
/// The board controller and the TUI program against this trait.
/// `MemoryService` holds records in process (and backs the server);
/// `HttpService` wraps an async HTTP client.
///
/// Bulk operations follow the confirmed-only contract: they return exactly
/// the records or identifiers the store actually changed. Callers must never
/// assume success for anything absent from the response.
#[async_trait]
pub trait TaskService: Send + Sync {
    // -- Projects --
    async fn list_projects(&self) -> Result<Vec<Project>, ServiceError>;
    async fn get_project(&self, id: i64) -> Result<Project, ServiceError>;
    async fn create_project(&self, input: &CreateProject) -> Result<Project, ServiceError>;
    async fn update_project(
        &self,
        id: i64,
        update: &UpdateProject,
    ) -> Result<Project, ServiceError>;
    async fn delete_project(&self, id: i64) -> Result<(), ServiceError>;

    // -- Tasks --
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ServiceError>;
    async fn get_task(&self, id: i64) -> Result<Task, ServiceError>;
    async fn create_task(&self, input: &CreateTask) -> Result<Task, ServiceError>;
    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, ServiceError>;
    async fn delete_task(&self, id: i64) -> Result<(), ServiceError>;

    // -- Bulk --
    async fn bulk_update_tasks(
        &self,
        ids: &[i64],
        fields: &UpdateTask,
    ) -> Result<Vec<Task>, ServiceError>;
    async fn bulk_delete_tasks(&self, ids: &[i64]) -> Result<Vec<i64>, ServiceError>;

    // -- Stats --
    async fn count_tasks_by_status(
        &self,
        project_id: i64,
    ) -> Result<Vec<(String, i64)>, ServiceError>;
}
