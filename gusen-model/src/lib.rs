//! Data model definitions shared across the Gusen admin crates.
#![allow(missing_docs)]

pub mod activity;
pub mod auth;
pub mod clients;
pub mod error;
pub mod identity;
pub mod pagination;
pub mod responses;
pub mod routes;

pub use activity::LoginLogEntry;
pub use auth::{LoginRequest, LoginResponse};
pub use clients::{
    AssignClientRequest, City, ClientAssignment, ClientDetail, ClientSearchQuery,
};
pub use error::ModelError;
pub use identity::{
    CreateUserRequest, LoginId, PinChangeRequest, PasswordChangeRequest,
    UpdateUserRequest, UserDetail, UserStatus, UserSummary,
};
pub use pagination::{Page, PageQuery, PageRequest};
pub use responses::ApiResponse;
