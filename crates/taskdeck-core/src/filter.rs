use crate::task::{Priority, Status, Task};

/// Client-side filtering pipeline: status, priority, and assignee filters
/// (exact match, `None` means "all"), then a free-text search matched
/// case-insensitively against title, description, and assignee.
///
/// Each predicate is independent, so the result is the same regardless of
/// evaluation order; cheap exact-match filters run before the substring scan.
/// The output of [`FilterState::apply`] is what feeds column grouping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub search: String,
}

impl FilterState {
    pub fn is_unfiltered(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.search.trim().is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if &task.assignee != assignee {
                return false;
            }
        }
        let query = self.search.trim().to_lowercase();
        if !query.is_empty() {
            let hit = task.title.to_lowercase().contains(&query)
                || task.description.to_lowercase().contains(&query)
                || task.assignee.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        true
    }

    /// The visible subset, preserving input order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: i64, status: Status, priority: Priority, assignee: &str, title: &str) -> Task {
        Task {
            id,
            project_id: 1,
            title: title.into(),
            description: format!("description for {title}"),
            status,
            priority,
            assignee: assignee.into(),
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn unfiltered_passes_everything_through() {
        let tasks = vec![
            task(1, Status::Todo, Priority::High, "sam", "Write docs"),
            task(2, Status::Done, Priority::Low, "alex", "Fix build"),
        ];
        let visible = FilterState::default().apply(&tasks);
        assert_eq!(visible, tasks);
    }

    #[test]
    fn status_filter_selects_exact_lane() {
        let tasks = vec![
            task(1, Status::Todo, Priority::High, "sam", "Write docs"),
            task(2, Status::Done, Priority::Low, "alex", "Fix build"),
        ];
        let filter = FilterState {
            status: Some(Status::Done),
            ..Default::default()
        };
        let visible = filter.apply(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn search_is_case_insensitive_across_three_fields() {
        let tasks = vec![
            task(1, Status::Todo, Priority::High, "sam", "Write DOCS"),
            task(2, Status::Todo, Priority::High, "alex", "Fix build"),
            task(3, Status::Todo, Priority::High, "docsworth", "Refactor"),
        ];
        let filter = FilterState {
            search: "docs".into(),
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&tasks).iter().map(|t| t.id).collect();
        // Title hit on 1, assignee hit on 3; description of every task contains
        // its own title, so 1 also hits there. Task 2 matches nothing.
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn filters_are_a_conjunction() {
        let tasks = vec![
            task(1, Status::Todo, Priority::High, "sam", "Write docs"),
            task(2, Status::Todo, Priority::Low, "sam", "More docs"),
            task(3, Status::Done, Priority::High, "sam", "Old docs"),
        ];
        let filter = FilterState {
            status: Some(Status::Todo),
            priority: Some(Priority::High),
            assignee: Some("sam".into()),
            search: "docs".into(),
        };
        let ids: Vec<i64> = filter.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn whitespace_search_is_ignored() {
        let tasks = vec![task(1, Status::Todo, Priority::High, "sam", "Write docs")];
        let filter = FilterState {
            search: "   ".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&tasks).len(), 1);
    }

    #[test]
    fn apply_preserves_input_order() {
        let tasks = vec![
            task(5, Status::Todo, Priority::High, "sam", "e"),
            task(2, Status::Todo, Priority::High, "sam", "b"),
            task(9, Status::Todo, Priority::High, "sam", "z"),
        ];
        let ids: Vec<i64> = FilterState::default()
            .apply(&tasks)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }
}
