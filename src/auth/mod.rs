pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserProfile;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account. Compared case-insensitively
    /// against existing accounts; stored lowercased.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
    /// Display name for the new account.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Date of birth.
    pub birth: NaiveDate,
}

/// Response structure after successful authentication (login or registration).
/// Contains the JWT access token and the authenticated user's profile,
/// which by construction carries no password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
    /// The authenticated user.
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let short_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            name: "Test User".to_string(),
            birth: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
            name: "Test User".to_string(),
            birth: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
        };
        assert!(invalid_email.validate().is_err());

        let short_password = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "123".to_string(),
            name: "Test User".to_string(),
            birth: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
        };
        assert!(short_password.validate().is_err());

        let blank_name = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            name: "".to_string(),
            birth: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
        };
        assert!(blank_name.validate().is_err());
    }
}
