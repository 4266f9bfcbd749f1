pub mod middleware;

pub use middleware::require_admin_session;
