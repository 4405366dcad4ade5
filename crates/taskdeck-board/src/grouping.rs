use taskdeck_core::task::{Status, Task};

/// Stable partition of `tasks` into the given lanes.
///
/// Relative order of the input is preserved within each lane; no re-sort by
/// any other key. A task whose status is not in `lanes` is excluded from
/// every group, which is a defined edge case rather than an error.
pub fn group_by_status(tasks: &[Task], lanes: &[Status]) -> Vec<(Status, Vec<Task>)> {
    lanes
        .iter()
        .map(|&lane| {
            let members = tasks
                .iter()
                .filter(|t| t.status == lane)
                .cloned()
                .collect();
            (lane, members)
        })
        .collect()
}
