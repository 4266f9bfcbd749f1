//! HTTP layer of the Gusen admin backend.

pub mod auth;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    startup::build_app,
};
