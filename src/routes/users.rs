use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{UpdateProfileRequest, UserProfile},
};
use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Retrieves the authenticated user's profile.
///
/// The query selects the projection columns only; the password hash never
/// leaves the users table on this path.
#[get("/me")]
pub async fn get_profile(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let profile = sqlx::query_as::<_, UserProfile>(
        "SELECT id, email, name, birth, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?;

    match profile {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(AppError::NotFound("User not found".into())),
    }
}

/// Updates the authenticated user's profile.
///
/// Both fields are optional; absent fields keep their current value.
/// Email and password are not editable here.
#[patch("/me")]
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    update_data: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, AppError> {
    update_data.validate()?;

    let profile = sqlx::query_as::<_, UserProfile>(
        "UPDATE users
         SET name = COALESCE($1, name),
             birth = COALESCE($2, birth),
             updated_at = now()
         WHERE id = $3
         RETURNING id, email, name, birth, created_at, updated_at",
    )
    .bind(&update_data.name)
    .bind(update_data.birth)
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?;

    match profile {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(AppError::NotFound("User not found".into())),
    }
}

/// Deletes the authenticated user's account.
///
/// A single DELETE statement; the foreign keys cascade through the user's
/// tasks, tags, and association edges, so the whole subtree disappears
/// atomically. There is no state in which the user is gone but orphaned
/// resources remain.
#[delete("/me")]
pub async fn delete_account(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.0)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
