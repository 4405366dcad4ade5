use taskdeck_core::task::{Status, Task, TaskFilter, UpdateTask};
use taskdeck_service::{ServiceError, TaskService};
use tracing::{debug, warn};

use crate::selection::SelectionSet;
use crate::store::TaskStore;

/// Result of a single-task move.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// The task was already in the target lane; no request was issued.
    NoChange,
    /// The store confirmed the move; the confirmed record is carried here.
    Moved(Task),
}

/// Result of a bulk move. `moved` counts records the store confirmed,
/// `skipped` counts selected tasks already at the target, and `failed`
/// counts requested changes the store did not confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkMoveOutcome {
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Result of a bulk delete. `deleted` may be less than `requested` when the
/// store confirms only part of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkDeleteOutcome {
    pub requested: usize,
    pub deleted: usize,
}

/// Orchestrates board commands against the record store and reconciles the
/// confirmed results into the injected [`TaskStore`].
///
/// Every write is write-then-reconcile: the local store changes only after
/// the record store confirms, so a failure never leaves the board showing a
/// state the server didn't produce. Confirmed responses are applied in
/// arrival order; there is no per-task locking.
pub struct BoardController<S> {
    service: S,
}

impl<S: TaskService> BoardController<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Reload the store from the record store and prune the selection.
    pub async fn refresh(
        &self,
        store: &mut TaskStore,
        selection: &mut SelectionSet,
        project_id: i64,
    ) -> Result<(), ServiceError> {
        let tasks = self
            .service
            .list_tasks(&TaskFilter {
                project_id: Some(project_id),
                ..Default::default()
            })
            .await?;
        store.replace_all(tasks);
        selection.reconcile(&store.ids());
        Ok(())
    }

    /// Move one task to `target`. No-op (and no network) when the task is
    /// already there. On success the store holds the server-confirmed
    /// record; on failure it is untouched.
    pub async fn move_task(
        &self,
        store: &mut TaskStore,
        task_id: i64,
        target: Status,
    ) -> Result<MoveOutcome, ServiceError> {
        let task = store
            .get(task_id)
            .ok_or_else(|| ServiceError::NotFound(format!("task {task_id}")))?;
        if task.status == target {
            return Ok(MoveOutcome::NoChange);
        }

        debug!(task_id, target = %target, "moving task");
        let update = UpdateTask {
            status: Some(target),
            ..Default::default()
        };
        let confirmed = self.service.update_task(task_id, &update).await?;
        store.merge_confirmed(vec![confirmed.clone()]);
        Ok(MoveOutcome::Moved(confirmed))
    }

    /// Move every selected task that is not already at `target` in one
    /// batched request. Merges only the records the store returned, clears
    /// the selection on success, and reports the confirmed count.
    pub async fn bulk_move(
        &self,
        store: &mut TaskStore,
        selection: &mut SelectionSet,
        target: Status,
    ) -> Result<BulkMoveOutcome, ServiceError> {
        let selected: Vec<&Task> = store
            .tasks()
            .iter()
            .filter(|t| selection.contains(t.id))
            .collect();
        let changing: Vec<i64> = selected
            .iter()
            .filter(|t| t.status != target)
            .map(|t| t.id)
            .collect();
        let skipped = selected.len() - changing.len();

        if changing.is_empty() {
            // Informational no-op; selection stays as it is.
            return Ok(BulkMoveOutcome {
                moved: 0,
                skipped,
                failed: 0,
            });
        }

        debug!(count = changing.len(), target = %target, "bulk moving tasks");
        let update = UpdateTask {
            status: Some(target),
            ..Default::default()
        };
        let confirmed = self.service.bulk_update_tasks(&changing, &update).await?;
        let moved = confirmed.len();
        let failed = changing.len() - moved;
        if failed > 0 {
            warn!(requested = changing.len(), confirmed = moved, "bulk move partially confirmed");
        }

        store.merge_confirmed(confirmed);
        selection.clear();
        Ok(BulkMoveOutcome {
            moved,
            skipped,
            failed,
        })
    }

    /// Delete the selected tasks in one batched request. The caller has
    /// already gathered confirmation for the gesture. Only ids the store
    /// confirms deleted leave the task store and the selection.
    pub async fn bulk_delete(
        &self,
        store: &mut TaskStore,
        selection: &mut SelectionSet,
    ) -> Result<BulkDeleteOutcome, ServiceError> {
        let ids = selection.ids();
        let requested = ids.len();
        if ids.is_empty() {
            return Ok(BulkDeleteOutcome {
                requested: 0,
                deleted: 0,
            });
        }

        debug!(count = requested, "bulk deleting tasks");
        let confirmed = self.service.bulk_delete_tasks(&ids).await?;
        let deleted = confirmed.len();
        if deleted < requested {
            warn!(requested, confirmed = deleted, "bulk delete partially confirmed");
        }

        store.remove_confirmed(&confirmed);
        selection.reconcile(&store.ids());
        Ok(BulkDeleteOutcome { requested, deleted })
    }
}
