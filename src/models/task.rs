use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::Tag;

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be non-empty.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Completion flag; defaults to false when omitted.
    pub is_completed: Option<bool>,
}

/// Partial update for a task. Only provided fields are applied; the owner
/// is fixed at creation and cannot be changed here.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub is_completed: Option<bool>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// Whether the task has been completed.
    pub is_completed: bool,
    /// Identifier of the user who owns the task.
    pub user_id: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` and the owner's user id.
    /// `is_completed` defaults to false when the input omits it.
    pub fn new(input: TaskInput, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            is_completed: input.is_completed.unwrap_or(false),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A task together with the tags currently attached to it, as returned by
/// single-task reads.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskWithTags {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl TaskWithTags {
    pub fn from_parts(task: Task, tags: Vec<Tag>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            is_completed: task.is_completed,
            user_id: task.user_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
            tags,
        }
    }
}
