//! # Auth API
//!
//! actix-web surface of the auth service: routes, JWT middleware, DTOs and
//! the mapping from domain errors to HTTP responses.

pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
