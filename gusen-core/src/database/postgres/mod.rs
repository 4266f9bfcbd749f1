//! PostgreSQL stores.
//!
//! The schema is owned outside this crate. The stores expect:
//!
//! ```text
//! users(login_id TEXT PRIMARY KEY, full_name TEXT NOT NULL, role TEXT NOT NULL,
//!       password_digest TEXT NOT NULL, pin_digest TEXT NOT NULL,
//!       user_status CHAR(1) NOT NULL, email TEXT, phone TEXT, city INTEGER,
//!       last_login TIMESTAMPTZ, created_at TIMESTAMPTZ NOT NULL, created_by TEXT,
//!       updated_at TIMESTAMPTZ, updated_by TEXT)
//!
//! user_login_log(id BIGSERIAL PRIMARY KEY, login_id TEXT NOT NULL,
//!       status TEXT NOT NULL, action_at TIMESTAMPTZ NOT NULL,
//!       channel_media TEXT, channel_device TEXT, ip_address TEXT)
//!
//! clients(client_code TEXT PRIMARY KEY, client_name TEXT NOT NULL)
//!
//! user_clients(login_id TEXT NOT NULL REFERENCES users,
//!       client_code TEXT NOT NULL UNIQUE REFERENCES clients,
//!       created_at TIMESTAMPTZ NOT NULL, created_by TEXT)
//!
//! cities(city_code INTEGER PRIMARY KEY, city_name TEXT NOT NULL,
//!       province_code TEXT, province_name TEXT)
//! ```

mod cities;
mod clients;
mod logs;
mod users;

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

pub use cities::PostgresCityStore;
pub use clients::PostgresClientStore;
pub use logs::PostgresLogStore;
pub use users::PostgresUserStore;

use crate::error::Result;

/// Open the shared connection pool. Called once at startup.
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;
    Ok(pool)
}
