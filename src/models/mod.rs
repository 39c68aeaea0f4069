pub mod task;
pub mod user;

pub use task::{StatusUpdate, Task, TaskInput, DEFAULT_STATUS};
pub use user::{PasswordUpdate, User, UserInput, DEFAULT_ROLE};
