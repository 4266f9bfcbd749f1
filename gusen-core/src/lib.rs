//! Core of the Gusen admin backend.
//!
//! Holds the session protocol (credential hashing, token issuance and the
//! bearer guard), the ranked pagination engine shared by every listing, the
//! store ports with their PostgreSQL and in-memory implementations, and the
//! use cases the HTTP layer exposes. Nothing here knows about HTTP.

pub mod auth;
pub mod database;
pub mod error;
pub mod identity;
pub mod pagination;
pub mod services;

pub use error::{AdminError, Result};
pub use identity::{Identity, WriteStamp};
