//! Common test utilities for integration tests.
//!
//! Every integration test needs a live Postgres reachable through
//! `DATABASE_URL`; tests that find the variable unset skip themselves so the
//! unit-test suite stays runnable without infrastructure.

#![allow(dead_code)]

use actix_web::test;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use taskhive::auth::AuthResponse;
use taskhive::config::Config;

/// Fixed signing secret for test apps; handlers and assertions share it
/// through the same `Config` value.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        server_port: 8080,
        server_host: "127.0.0.1".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        token_ttl_hours: 24,
    }
}

/// Connects to the test database and brings the schema up to date.
pub async fn setup_pool(database_url: &str) -> PgPool {
    let pool = PgPool::connect(database_url)
        .await
        .expect("Failed to connect to test DB");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test DB");
    pool
}

/// Removes a user by email; tasks, tags, and association edges cascade.
pub async fn cleanup_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

// Helper struct to hold auth details
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

pub async fn register_and_login_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    name: &str,
    password: &str,
) -> Result<TestUser, String> {
    let req_register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({
            "email": email,
            "password": password,
            "name": name,
            "birth": "1990-01-15"
        }))
        .to_request();
    let resp_register = test::call_service(app, req_register).await;
    let resp_status = resp_register.status();
    let auth_response_bytes = test::read_body(resp_register).await;

    if !resp_status.is_success() {
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            resp_status,
            String::from_utf8_lossy(&auth_response_bytes)
        ));
    }
    let auth_response: AuthResponse = serde_json::from_slice(&auth_response_bytes)
        .map_err(|e| format!("Failed to parse registration response: {}", e))?;

    Ok(TestUser {
        id: auth_response.user.id,
        token: auth_response.token,
    })
}

/// Builds the standard test App pieces. Kept as a macro because the actix
/// `App` type cannot be returned from a plain helper function.
#[macro_export]
macro_rules! build_test_app {
    ($pool:expr, $config:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new($config.clone()))
                .wrap(
                    actix_cors::Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(actix_web::middleware::Logger::default())
                .service(taskhive::routes::health::health)
                .service(
                    actix_web::web::scope("/api")
                        .wrap(taskhive::auth::AuthMiddleware)
                        .configure(taskhive::routes::config),
                ),
        )
        .await
    };
}
