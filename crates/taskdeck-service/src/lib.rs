pub mod http;
pub mod memory;
pub mod traits;

pub use http::HttpService;
pub use memory::MemoryService;
pub use traits::{ServiceError, TaskService};
