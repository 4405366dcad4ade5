//! Kanban board state and interaction model.
//!
//! [`TaskStore`] holds the task records for the active project and is only
//! mutated by reconciling confirmed store responses. [`SelectionSet`] tracks
//! multi-selected task ids and is pruned against the store after every
//! change. [`DragSession`] tracks the one in-flight drag gesture.
//! [`BoardController`] turns gestures into record-store commands and applies
//! the confirmed results.

pub mod controller;
pub mod drag;
pub mod grouping;
pub mod selection;
pub mod store;

pub use controller::{BoardController, BulkDeleteOutcome, BulkMoveOutcome, MoveOutcome};
pub use drag::DragSession;
pub use grouping::group_by_status;
pub use selection::SelectionSet;
pub use store::TaskStore;
