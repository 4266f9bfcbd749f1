mod activity;
mod auth;
mod clients;
mod users;

pub use activity::ActivityLogService;
pub use auth::AuthService;
pub use clients::ClientDirectoryService;
pub use users::{PIN_LENGTH, UserManagementService, validate_pin};
