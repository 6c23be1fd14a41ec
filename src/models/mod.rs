pub mod tag;
pub mod task;
pub mod user;

pub use tag::{Tag, TagInput, TagWithTasks};
pub use task::{Task, TaskInput, TaskUpdate, TaskWithTags};
pub use user::{UpdateProfileRequest, User, UserProfile};
