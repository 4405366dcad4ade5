use reqwest::{Client, StatusCode};
use serde::Deserialize;
use taskdeck_core::project::{CreateProject, Project, UpdateProject};
use taskdeck_core::task::{CreateTask, Task, TaskFilter, UpdateTask};

use crate::{ServiceError, TaskService};

use async_trait::async_trait;

/// Async HTTP client implementation of [`TaskService`].
/// Connects to a running taskdeck-server (or anything speaking its API).
///
/// Validation failures (blank titles and the like) are raised here, before
/// any request goes out.
pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Check if the server is reachable.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("connection failed: {e}")))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ServiceError::Internal(format!(
                "health check failed: {}",
                resp.status()
            )))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn put_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let resp = self
            .client
            .put(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn delete_req(&self, path: &str) -> Result<(), ServiceError> {
        let resp = self
            .client
            .delete(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(parse_error(resp).await)
        }
    }
}

#[derive(Debug, Deserialize)]
struct BulkDeleteResponse {
    deleted: Vec<i64>,
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

async fn parse_error(resp: reqwest::Response) -> ServiceError {
    let status = resp.status();
    parse_error_with_status(status, resp).await
}

async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> ServiceError {
    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
        ServiceError::NotFound(msg)
    } else if status == StatusCode::BAD_REQUEST {
        ServiceError::InvalidInput(msg)
    } else {
        ServiceError::Internal(msg)
    }
}

#[async_trait]
impl TaskService for HttpService {
    async fn list_projects(&self) -> Result<Vec<Project>, ServiceError> {
        self.get_json("/api/projects").await
    }

    async fn get_project(&self, id: i64) -> Result<Project, ServiceError> {
        self.get_json(&format!("/api/projects/{id}")).await
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, ServiceError> {
        input.validate()?;
        self.post_json("/api/projects", input).await
    }

    async fn update_project(
        &self,
        id: i64,
        update: &UpdateProject,
    ) -> Result<Project, ServiceError> {
        self.put_json(&format!("/api/projects/{id}"), update).await
    }

    async fn delete_project(&self, id: i64) -> Result<(), ServiceError> {
        self.delete_req(&format!("/api/projects/{id}")).await
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ServiceError> {
        let mut params = Vec::new();
        if let Some(pid) = filter.project_id {
            params.push(format!("project_id={pid}"));
        }
        if let Some(status) = filter.status {
            params.push(format!("status={}", status.as_str()));
        }
        if let Some(priority) = filter.priority {
            params.push(format!("priority={}", priority.as_str()));
        }
        if let Some(assignee) = &filter.assignee {
            params.push(format!("assignee={assignee}"));
        }
        if let Some(limit) = filter.limit {
            params.push(format!("limit={limit}"));
        }
        let qs = if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        };
        self.get_json(&format!("/api/tasks{qs}")).await
    }

    async fn get_task(&self, id: i64) -> Result<Task, ServiceError> {
        self.get_json(&format!("/api/tasks/{id}")).await
    }

    async fn create_task(&self, input: &CreateTask) -> Result<Task, ServiceError> {
        input.validate()?;
        self.post_json("/api/tasks", input).await
    }

    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, ServiceError> {
        update.validate()?;
        self.put_json(&format!("/api/tasks/{id}"), update).await
    }

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        self.delete_req(&format!("/api/tasks/{id}")).await
    }

    async fn bulk_update_tasks(
        &self,
        ids: &[i64],
        fields: &UpdateTask,
    ) -> Result<Vec<Task>, ServiceError> {
        fields.validate()?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.post_json(
            "/api/tasks/bulk-update",
            &serde_json::json!({ "ids": ids, "fields": fields }),
        )
        .await
    }

    async fn bulk_delete_tasks(&self, ids: &[i64]) -> Result<Vec<i64>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let resp: BulkDeleteResponse = self
            .post_json("/api/tasks/bulk-delete", &serde_json::json!({ "ids": ids }))
            .await?;
        Ok(resp.deleted)
    }

    async fn count_tasks_by_status(
        &self,
        project_id: i64,
    ) -> Result<Vec<(String, i64)>, ServiceError> {
        self.get_json(&format!(
            "/api/tasks/count-by-status?project_id={project_id}"
        ))
        .await
    }
}
