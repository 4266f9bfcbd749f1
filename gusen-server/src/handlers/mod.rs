pub mod auth;
pub mod clients;
pub mod health;
pub mod logs;
pub mod users;
