use taskdeck_core::task::{Status, Task};

/// Tracks the single in-flight drag gesture: the dragged task and the lane
/// currently under the pointer.
///
/// The hovered lane is a visual affordance only; the drop target is whatever
/// lane `drop_on` is called with, never the (possibly stale) hover. This
/// tracker holds no reference to the task store and performs no I/O, so the
/// same controller logic runs in tests without a pointer environment.
#[derive(Debug, Default, Clone)]
pub struct DragSession {
    dragged: Option<Task>,
    hovered: Option<Status>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn dragged(&self) -> Option<&Task> {
        self.dragged.as_ref()
    }

    pub fn hovered(&self) -> Option<Status> {
        self.hovered
    }

    /// Start tracking `task`. Idempotent while a drag is active: a second
    /// call before `end_drag` leaves the session unchanged.
    pub fn begin_drag(&mut self, task: Task) {
        if self.dragged.is_none() {
            self.dragged = Some(task);
        }
    }

    pub fn drag_over(&mut self, lane: Status) {
        self.hovered = Some(lane);
    }

    /// Clear the hovered lane, but only when the pointer actually left the
    /// lane's bounding region. Leave events fired while crossing child
    /// elements pass `left_bounds: false` and are ignored.
    pub fn drag_leave(&mut self, left_bounds: bool) {
        if left_bounds {
            self.hovered = None;
        }
    }

    /// Complete the drag on `lane`: yields the dragged task exactly once and
    /// clears all tracked state, whether or not the caller's follow-up
    /// command succeeds. Returns `None` when no drag is active.
    pub fn drop_on(&mut self, lane: Status) -> Option<(Task, Status)> {
        self.hovered = None;
        self.dragged.take().map(|task| (task, lane))
    }

    /// Cancelled drag (Escape, drop outside any lane): clear everything.
    pub fn end_drag(&mut self) {
        self.dragged = None;
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taskdeck_core::task::Priority;

    fn task(id: i64) -> Task {
        Task {
            id,
            project_id: 1,
            title: format!("Task {id}"),
            description: String::new(),
            status: Status::Todo,
            priority: Priority::Medium,
            assignee: String::new(),
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn begin_is_idempotent_while_active() {
        let mut drag = DragSession::new();
        drag.begin_drag(task(1));
        drag.begin_drag(task(2));
        assert_eq!(drag.dragged().unwrap().id, 1);
    }

    #[test]
    fn leave_clears_hover_only_outside_bounds() {
        let mut drag = DragSession::new();
        drag.begin_drag(task(1));
        drag.drag_over(Status::InProgress);

        drag.drag_leave(false);
        assert_eq!(drag.hovered(), Some(Status::InProgress));

        drag.drag_leave(true);
        assert_eq!(drag.hovered(), None);
    }

    #[test]
    fn drop_yields_task_once_and_clears_state() {
        let mut drag = DragSession::new();
        drag.begin_drag(task(5));
        drag.drag_over(Status::InProgress);

        let dropped = drag.drop_on(Status::Done);
        assert!(matches!(dropped, Some((ref t, Status::Done)) if t.id == 5));
        assert!(!drag.is_dragging());
        assert_eq!(drag.hovered(), None);

        assert!(drag.drop_on(Status::Done).is_none());
    }

    #[test]
    fn drop_target_is_independent_of_stale_hover() {
        let mut drag = DragSession::new();
        drag.begin_drag(task(5));
        drag.drag_over(Status::InProgress);
        drag.drag_leave(true);
        assert_eq!(drag.hovered(), None);

        let dropped = drag.drop_on(Status::Done);
        assert!(matches!(dropped, Some((ref t, Status::Done)) if t.id == 5));
    }

    #[test]
    fn end_drag_clears_unconditionally() {
        let mut drag = DragSession::new();
        drag.begin_drag(task(1));
        drag.drag_over(Status::Done);
        drag.end_drag();
        assert!(!drag.is_dragging());
        assert_eq!(drag.hovered(), None);
    }

    #[test]
    fn drop_without_active_drag_is_none() {
        let mut drag = DragSession::new();
        assert!(drag.drop_on(Status::Todo).is_none());
    }
}
