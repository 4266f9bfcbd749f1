use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gusen_model::LoginLogEntry;
use sqlx::{FromRow, PgPool};

use crate::{
    database::ports::LogStore,
    error::Result,
    pagination::{Listing, PageWindow, sql::RankedWindow},
};

// `id` is a serial, so it stands in for insertion order among equal times.
const LOG_LISTING: RankedWindow = RankedWindow {
    table: "user_login_log",
    columns: "login_id, status, action_at, channel_media, channel_device, ip_address",
    search_columns: &["login_id"],
    order_by: "action_at DESC, id ASC",
};

#[derive(Debug, FromRow)]
struct LoginLogRow {
    login_id: String,
    status: String,
    action_at: DateTime<Utc>,
    channel_media: Option<String>,
    channel_device: Option<String>,
    ip_address: Option<String>,
}

impl From<LoginLogRow> for LoginLogEntry {
    fn from(row: LoginLogRow) -> Self {
        LoginLogEntry {
            login_id: row.login_id,
            status: row.status,
            action_at: row.action_at,
            channel_media: row.channel_media,
            channel_device: row.channel_device,
            ip_address: row.ip_address,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostgresLogStore {
    pool: PgPool,
}

impl PostgresLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogStore for PostgresLogStore {
    async fn list(&self, window: &PageWindow) -> Result<Listing<LoginLogEntry>> {
        let rows = LOG_LISTING
            .rows_query(window)
            .build_query_as::<LoginLogRow>()
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = LOG_LISTING
            .count_query(window)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(Listing {
            rows: rows.into_iter().map(LoginLogEntry::from).collect(),
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}
