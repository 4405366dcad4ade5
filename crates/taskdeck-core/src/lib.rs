pub mod error;
pub mod filter;
pub mod project;
pub mod task;

pub use error::TaskdeckError;
pub use filter::FilterState;
pub use project::Project;
pub use task::{Priority, Status, Task};
