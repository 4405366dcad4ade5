use std::collections::BTreeSet;

/// Set of multi-selected task identifiers.
///
/// Invariant: every member corresponds to a task currently visible in the
/// store. `reconcile` enforces it and must run after every store change
/// (refresh, delete, filter change, project switch) so stale ids never
/// linger.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: BTreeSet<i64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, task_id: i64, included: bool) {
        if included {
            self.ids.insert(task_id);
        } else {
            self.ids.remove(&task_id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop members no longer present in `current`.
    pub fn reconcile(&mut self, current: &[i64]) {
        self.ids.retain(|id| current.contains(id));
    }

    pub fn contains(&self, task_id: i64) -> bool {
        self.ids.contains(&task_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }
}
