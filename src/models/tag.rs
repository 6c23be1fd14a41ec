use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::Task;

/// Input structure for creating or renaming a tag.
///
/// Tag names are unique per owner; the same name may exist for two
/// different users. The constraint lives on the `tags` table and a
/// violation surfaces as a 409.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Represents a tag entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    /// Identifier of the user who owns the tag.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(input: TagInput, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A tag together with the tasks currently attached to it, as returned by
/// single-tag reads and by attach.
#[derive(Debug, Serialize, Deserialize)]
pub struct TagWithTasks {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

impl TagWithTasks {
    pub fn from_parts(tag: Tag, tasks: Vec<Task>) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            user_id: tag.user_id,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
            tasks,
        }
    }
}
