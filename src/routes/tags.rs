use crate::{
    auth::AuthenticatedUser,
    error::{is_unique_violation, AppError},
    models::{Tag, TagInput, TagWithTasks, Task},
    routes::tasks::load_owned_task,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Fetches a tag by id alone, then checks ownership.
///
/// Same two-step lookup as tasks: absence is 404, foreign ownership is 401,
/// and the two must not be conflated.
async fn load_owned_tag(pool: &PgPool, tag_id: Uuid, user_id: Uuid) -> Result<Tag, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, name, user_id, created_at, updated_at FROM tags WHERE id = $1",
    )
    .bind(tag_id)
    .fetch_optional(pool)
    .await?;

    match tag {
        Some(tag) if tag.user_id == user_id => Ok(tag),
        Some(_) => Err(AppError::Unauthorized(
            "You are not authorized to access this tag".into(),
        )),
        None => Err(AppError::NotFound("Tag not found".into())),
    }
}

/// Loads the tasks currently attached to a tag, in insertion order.
async fn load_attached_tasks(pool: &PgPool, tag_id: Uuid) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT t.id, t.title, t.description, t.is_completed, t.user_id, t.created_at, t.updated_at
         FROM tasks t
         INNER JOIN task_tags tt ON tt.task_id = t.id
         WHERE tt.tag_id = $1
         ORDER BY t.created_at",
    )
    .bind(tag_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Retrieves all tags owned by the authenticated user, in insertion order.
#[get("")]
pub async fn get_tags(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT id, name, user_id, created_at, updated_at
         FROM tags WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user.0)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tags))
}

/// Creates a new tag owned by the authenticated user.
///
/// Tag names are unique per user; a duplicate name is a 409. The same name
/// is fine for two different users.
#[post("")]
pub async fn create_tag(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    tag_data: web::Json<TagInput>,
) -> Result<impl Responder, AppError> {
    tag_data.validate()?;

    let tag = Tag::new(tag_data.into_inner(), user.0);

    let result = sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (id, name, user_id)
         VALUES ($1, $2, $3)
         RETURNING id, name, user_id, created_at, updated_at",
    )
    .bind(tag.id)
    .bind(tag.name)
    .bind(tag.user_id)
    .fetch_one(&**pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Tag with this name already exists for this user".into())
        } else {
            e.into()
        }
    })?;

    Ok(HttpResponse::Created().json(result))
}

/// Retrieves a specific tag by its ID, including its attached tasks.
///
/// ## Responses:
/// - `200 OK`: the tag with its task list.
/// - `401 Unauthorized`: the tag exists but belongs to another user.
/// - `404 Not Found`: no tag with this ID exists.
#[get("/{id}")]
pub async fn get_tag(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    tag_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let tag = load_owned_tag(&pool, tag_id.into_inner(), user.0).await?;
    let tasks = load_attached_tasks(&pool, tag.id).await?;

    Ok(HttpResponse::Ok().json(TagWithTasks::from_parts(tag, tasks)))
}

/// Renames a tag owned by the authenticated user.
///
/// Renaming onto a name the user already has is a 409, same as create.
#[patch("/{id}")]
pub async fn update_tag(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    tag_id: web::Path<Uuid>,
    tag_data: web::Json<TagInput>,
) -> Result<impl Responder, AppError> {
    tag_data.validate()?;
    let tag_id = tag_id.into_inner();

    load_owned_tag(&pool, tag_id, user.0).await?;

    let result = sqlx::query_as::<_, Tag>(
        "UPDATE tags SET name = $1, updated_at = now()
         WHERE id = $2
         RETURNING id, name, user_id, created_at, updated_at",
    )
    .bind(&tag_data.name)
    .bind(tag_id)
    .fetch_one(&**pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Tag with this name already exists for this user".into())
        } else {
            e.into()
        }
    })?;

    Ok(HttpResponse::Ok().json(result))
}

/// Deletes a tag owned by the authenticated user.
///
/// The tag's association edges go with it; the tasks themselves survive.
#[delete("/{id}")]
pub async fn delete_tag(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    tag_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let tag_id = tag_id.into_inner();

    load_owned_tag(&pool, tag_id, user.0).await?;

    sqlx::query("DELETE FROM tags WHERE id = $1")
        .bind(tag_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Attaches a tag to a task.
///
/// Both endpoints must belong to the caller. The tag is checked before the
/// task, so when both ids are bad the tag's error wins; clients rely on that
/// precedence. Attaching an already-attached pair is a 409, not a no-op.
#[post("/{tag_id}/tasks/{task_id}")]
pub async fn attach_tag(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, AppError> {
    let (tag_id, task_id) = path.into_inner();

    let tag = load_owned_tag(&pool, tag_id, user.0).await?;
    load_owned_task(&pool, task_id, user.0).await?;

    sqlx::query("INSERT INTO task_tags (task_id, tag_id) VALUES ($1, $2)")
        .bind(task_id)
        .bind(tag_id)
        .execute(&**pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Tag is already attached to this task".into())
            } else {
                e.into()
            }
        })?;

    let tasks = load_attached_tasks(&pool, tag_id).await?;

    Ok(HttpResponse::Created().json(TagWithTasks::from_parts(tag, tasks)))
}

/// Detaches a tag from a task.
///
/// Same dual ownership verification as attach. Removing an edge that does
/// not exist is not an error; the operation is a 204 either way.
#[delete("/{tag_id}/tasks/{task_id}")]
pub async fn detach_tag(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, AppError> {
    let (tag_id, task_id) = path.into_inner();

    load_owned_tag(&pool, tag_id, user.0).await?;
    load_owned_task(&pool, task_id, user.0).await?;

    sqlx::query("DELETE FROM task_tags WHERE task_id = $1 AND tag_id = $2")
        .bind(task_id)
        .bind(tag_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
