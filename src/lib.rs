#![doc = "The `taskhive` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication"]
#![doc = "mechanisms, routing configuration, and error handling for the TaskHive"]
#![doc = "backend. It is used by the main binary (`main.rs`) to construct and run"]
#![doc = "the application, and by the integration tests to build an in-process app."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
