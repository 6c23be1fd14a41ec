use crate::{
    auth::{generate_token, hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest},
    config::Config,
    error::{is_unique_violation, AppError},
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns the profile together with an
/// authentication token. The email is lowercased before insertion so that
/// uniqueness is case-insensitive; a duplicate surfaces as 409.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    let email = register_data.email.trim().to_lowercase();
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user; the unique index on email is the arbiter of duplicates,
    // so two concurrent registrations cannot both succeed.
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash, name, birth)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, email, password_hash, name, birth, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&password_hash)
    .bind(&register_data.name)
    .bind(register_data.birth)
    .fetch_one(&**pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Email already exists".into())
        } else {
            e.into()
        }
    })?;

    // Generate token
    let token = generate_token(user.id, &config.jwt_secret, config.token_ttl_hours)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Login user
///
/// Authenticates a user and returns the profile together with an
/// authentication token. An unknown email and a wrong password produce the
/// same 401 body so callers cannot probe which addresses are registered.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let email = login_data.email.trim().to_lowercase();

    // Get user from database
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, name, birth, created_at, updated_at
         FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => {
            // Verify password
            if verify_password(&login_data.password, &user.password_hash)? {
                // Generate token
                let token = generate_token(user.id, &config.jwt_secret, config.token_ttl_hours)?;
                Ok(HttpResponse::Ok().json(AuthResponse {
                    token,
                    user: user.into(),
                }))
            } else {
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
