use taskdeck_core::Task;

/// Owned, in-memory collection of task records for the active project.
/// Source of truth for rendering.
///
/// Mutations happen only through reconciliation with what the record store
/// confirmed: `merge_confirmed` after updates, `remove_confirmed` after
/// deletes, `replace_all` after a fresh listing. Nothing here runs ahead of
/// an unconfirmed write.
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.tasks.iter().map(|t| t.id).collect()
    }

    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Append a record the store confirmed created.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace records by identifier with their confirmed versions.
    /// Confirmed records for identifiers not present are ignored; present
    /// records the server did not return are left unchanged. Returns how
    /// many records were replaced.
    pub fn merge_confirmed(&mut self, confirmed: Vec<Task>) -> usize {
        let mut merged = 0;
        for record in confirmed {
            if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == record.id) {
                *slot = record;
                merged += 1;
            }
        }
        merged
    }

    /// Remove exactly the confirmed identifiers. Returns how many records
    /// were removed.
    pub fn remove_confirmed(&mut self, ids: &[i64]) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !ids.contains(&t.id));
        before - self.tasks.len()
    }
}
