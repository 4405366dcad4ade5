use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use taskdeck_core::project::{CreateProject, Project, UpdateProject};
use taskdeck_core::task::{CreateTask, Status, Task, TaskFilter, UpdateTask};

use crate::{ServiceError, TaskService};

/// In-process implementation holding records behind a mutex.
///
/// Each instance owns its own records; construct one and pass it where it is
/// needed rather than sharing module-level state. Identifiers are positive
/// integers assigned here, and timestamps are set on write, mirroring what
/// the hosted store does.
pub struct MemoryService {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    next_project_id: i64,
    next_task_id: i64,
}

impl MemoryService {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_project_id: 1,
                next_task_id: 1,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            // A poisoned lock still guards consistent data here; every
            // mutation completes before the guard drops.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for MemoryService {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_update(task: &mut Task, update: &UpdateTask) {
    if let Some(title) = &update.title {
        task.title = title.clone();
    }
    if let Some(description) = &update.description {
        task.description = description.clone();
    }
    if let Some(status) = update.status {
        task.status = status;
    }
    if let Some(priority) = update.priority {
        task.priority = priority;
    }
    if let Some(assignee) = &update.assignee {
        task.assignee = assignee.clone();
    }
    if let Some(due_date) = update.due_date {
        task.due_date = due_date;
    }
    task.updated_at = Utc::now();
}

fn filter_matches(task: &Task, filter: &TaskFilter) -> bool {
    if let Some(pid) = filter.project_id {
        if task.project_id != pid {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if task.status != status {
            return false;
        }
    }
    if let Some(priority) = filter.priority {
        if task.priority != priority {
            return false;
        }
    }
    if let Some(assignee) = &filter.assignee {
        if &task.assignee != assignee {
            return false;
        }
    }
    true
}

#[async_trait]
impl TaskService for MemoryService {
    async fn list_projects(&self) -> Result<Vec<Project>, ServiceError> {
        Ok(self.lock().projects.clone())
    }

    async fn get_project(&self, id: i64) -> Result<Project, ServiceError> {
        self.lock()
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("project {id}")))
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, ServiceError> {
        input.validate()?;
        let mut inner = self.lock();
        let now = Utc::now();
        let project = Project {
            id: inner.next_project_id,
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.next_project_id += 1;
        inner.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: i64,
        update: &UpdateProject,
    ) -> Result<Project, ServiceError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ServiceError::InvalidInput("name must not be empty".into()));
            }
        }
        let mut inner = self.lock();
        let project = inner
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("project {id}")))?;
        if let Some(name) = &update.name {
            project.name = name.clone();
        }
        if let Some(description) = &update.description {
            project.description = description.clone();
        }
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn delete_project(&self, id: i64) -> Result<(), ServiceError> {
        let mut inner = self.lock();
        let before = inner.projects.len();
        inner.projects.retain(|p| p.id != id);
        if inner.projects.len() == before {
            return Err(ServiceError::NotFound(format!("project {id}")));
        }
        // A project owns its tasks; they go with it.
        inner.tasks.retain(|t| t.project_id != id);
        Ok(())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ServiceError> {
        let inner = self.lock();
        let mut tasks: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|t| filter_matches(t, filter))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            tasks.truncate(limit.max(0) as usize);
        }
        Ok(tasks)
    }

    async fn get_task(&self, id: i64) -> Result<Task, ServiceError> {
        self.lock()
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("task {id}")))
    }

    async fn create_task(&self, input: &CreateTask) -> Result<Task, ServiceError> {
        input.validate()?;
        let mut inner = self.lock();
        if !inner.projects.iter().any(|p| p.id == input.project_id) {
            return Err(ServiceError::NotFound(format!(
                "project {}",
                input.project_id
            )));
        }
        let now = Utc::now();
        let task = Task {
            id: inner.next_task_id,
            project_id: input.project_id,
            title: input.title.clone(),
            description: input.description.clone(),
            status: input.status,
            priority: input.priority,
            assignee: input.assignee.clone(),
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        };
        inner.next_task_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, ServiceError> {
        update.validate()?;
        let mut inner = self.lock();
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("task {id}")))?;
        apply_update(task, update);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        let mut inner = self.lock();
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(ServiceError::NotFound(format!("task {id}")));
        }
        Ok(())
    }

    async fn bulk_update_tasks(
        &self,
        ids: &[i64],
        fields: &UpdateTask,
    ) -> Result<Vec<Task>, ServiceError> {
        fields.validate()?;
        let mut inner = self.lock();
        let mut updated = Vec::new();
        for &id in ids {
            // Unknown ids are skipped, not an error; the response carries
            // exactly the records that changed.
            if let Some(task) = inner.tasks.iter_mut().find(|t| t.id == id) {
                apply_update(task, fields);
                updated.push(task.clone());
            }
        }
        Ok(updated)
    }

    async fn bulk_delete_tasks(&self, ids: &[i64]) -> Result<Vec<i64>, ServiceError> {
        let mut inner = self.lock();
        let mut deleted = Vec::new();
        for &id in ids {
            let before = inner.tasks.len();
            inner.tasks.retain(|t| t.id != id);
            if inner.tasks.len() < before {
                deleted.push(id);
            }
        }
        Ok(deleted)
    }

    async fn count_tasks_by_status(
        &self,
        project_id: i64,
    ) -> Result<Vec<(String, i64)>, ServiceError> {
        let inner = self.lock();
        Ok(Status::ALL
            .iter()
            .map(|&status| {
                let count = inner
                    .tasks
                    .iter()
                    .filter(|t| t.project_id == project_id && t.status == status)
                    .count() as i64;
                (status.as_str().to_string(), count)
            })
            .collect())
    }
}
