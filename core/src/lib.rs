pub mod error;
pub mod model;
pub mod recommend;
pub mod store;
pub mod time;

pub use error::TaskError;
pub use model::task::{Priority, Status, Task, TaskId};
pub use recommend::next_task;
pub use store::TaskStore;
pub use time::{format_due, parse_due, ZONE};
