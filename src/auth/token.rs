use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Generates a JWT for a given user ID.
///
/// The signing secret and token lifetime come from the process configuration,
/// loaded once at startup; this function never touches the environment.
///
/// # Arguments
/// * `user_id` - The ID of the user for whom the token is generated.
/// * `secret` - The HS256 signing secret.
/// * `ttl_hours` - Token lifetime in hours.
///
/// # Returns
/// A `Result` containing the JWT string if successful, or
/// `AppError::InternalServerError` if token encoding fails.
pub fn generate_token(user_id: Uuid, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(ttl_hours))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// Verification fails closed: a bad signature, a malformed token, and an
/// expired token all come back as `AppError::Unauthorized`. There is no
/// partial identity on failure.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
