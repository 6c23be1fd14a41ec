use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Tag, Task, TaskInput, TaskUpdate, TaskWithTags},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Fetches a task by id alone, then checks ownership.
///
/// The lookup is deliberately NOT collapsed into `WHERE id = $1 AND user_id = $2`:
/// a missing row and a row owned by someone else must stay distinguishable,
/// 404 versus 401.
pub(crate) async fn load_owned_task(
    pool: &PgPool,
    task_id: Uuid,
    user_id: Uuid,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, is_completed, user_id, created_at, updated_at
         FROM tasks WHERE id = $1",
    )
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    match task {
        Some(task) if task.user_id == user_id => Ok(task),
        Some(_) => Err(AppError::Unauthorized(
            "You are not authorized to access this task".into(),
        )),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Retrieves all tasks owned by the authenticated user, in insertion order.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, is_completed, user_id, created_at, updated_at
         FROM tasks WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user.0)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`:
/// - `title`: non-empty title (required).
/// - `description` (optional): a description of the task.
/// - `is_completed` (optional): completion flag, defaults to false.
///
/// ## Responses:
/// - `201 Created`: the newly created `Task`.
/// - `400 Bad Request`: validation failure on the input.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.0);

    let result = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, is_completed, user_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, title, description, is_completed, user_id, created_at, updated_at",
    )
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.is_completed)
    .bind(task.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Loads the tags currently attached to a task, in insertion order.
async fn load_attached_tags(pool: &PgPool, task_id: Uuid) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT g.id, g.name, g.user_id, g.created_at, g.updated_at
         FROM tags g
         INNER JOIN task_tags tt ON tt.tag_id = g.id
         WHERE tt.task_id = $1
         ORDER BY g.created_at",
    )
    .bind(task_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// Retrieves a specific task by its ID, including its attached tags.
///
/// ## Responses:
/// - `200 OK`: the task with its tag list, if it exists and the caller owns it.
/// - `401 Unauthorized`: the task exists but belongs to another user.
/// - `404 Not Found`: no task with this ID exists.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = load_owned_task(&pool, task_id.into_inner(), user.0).await?;
    let tags = load_attached_tags(&pool, task.id).await?;
    Ok(HttpResponse::Ok().json(TaskWithTags::from_parts(task, tags)))
}

/// Partially updates a task owned by the authenticated user.
///
/// Only the provided fields are applied; everything else keeps its current
/// value. The owner is immutable.
#[patch("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task_id = task_id.into_inner();

    // Existence first, ownership second
    load_owned_task(&pool, task_id, user.0).await?;

    let result = sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = COALESCE($1, title),
             description = COALESCE($2, description),
             is_completed = COALESCE($3, is_completed),
             updated_at = now()
         WHERE id = $4
         RETURNING id, title, description, is_completed, user_id, created_at, updated_at",
    )
    .bind(&task_data.title)
    .bind(&task_data.description)
    .bind(task_data.is_completed)
    .bind(task_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Deletes a task owned by the authenticated user.
///
/// The task's association edges go with it via the join table's foreign key;
/// the tags themselves survive.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    load_owned_task(&pool, task_id, user.0).await?;

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
