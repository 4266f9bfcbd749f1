use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gusen_model::{LoginId, UpdateUserRequest, UserStatus, UserSummary};
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::{
    database::ports::UserStore,
    error::{AdminError, Result},
    identity::{Identity, WriteStamp},
    pagination::{Listing, PageWindow, sql::RankedWindow},
};

const USER_LISTING: RankedWindow = RankedWindow {
    table: "users",
    columns: "login_id, full_name, role, user_status, created_at, updated_at",
    search_columns: &["full_name", "email"],
    order_by: "created_at ASC, login_id ASC",
};

#[derive(Debug, FromRow)]
struct UserRow {
    login_id: String,
    full_name: String,
    role: String,
    password_digest: String,
    pin_digest: String,
    user_status: String,
    email: Option<String>,
    phone: Option<String>,
    city: Option<i32>,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    created_by: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
}

impl TryFrom<UserRow> for Identity {
    type Error = AdminError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(Identity {
            login_id: LoginId::parse(&row.login_id)?,
            full_name: row.full_name,
            role: row.role,
            credential_digest: row.password_digest,
            pin_digest: row.pin_digest,
            status: UserStatus::from_code(&row.user_status)?,
            email: row.email,
            phone: row.phone,
            city: row.city,
            last_login: row.last_login,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        })
    }
}

#[derive(Debug, FromRow)]
struct UserSummaryRow {
    login_id: String,
    full_name: String,
    role: String,
    user_status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserSummaryRow> for UserSummary {
    type Error = AdminError;

    fn try_from(row: UserSummaryRow) -> Result<Self> {
        Ok(UserSummary {
            login_id: LoginId::parse(&row.login_id)?,
            full_name: row.full_name,
            status: UserStatus::from_code(&row.user_status)?,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL-backed implementation of the [`UserStore`] port.
#[derive(Clone, Debug)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn require_row(rows_affected: u64, login_id: &LoginId) -> Result<()> {
    if rows_affected == 0 {
        return Err(AdminError::NotFound(format!("user {login_id}")));
    }
    Ok(())
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_login_id(&self, login_id: &LoginId) -> Result<Option<Identity>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                login_id, full_name, role, password_digest, pin_digest,
                user_status, email, phone, city, last_login,
                created_at, created_by, updated_at, updated_by
            FROM users
            WHERE login_id = $1
            "#,
        )
        .bind(login_id.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.map(Identity::try_from).transpose()
    }

    async fn list(&self, window: &PageWindow) -> Result<Listing<UserSummary>> {
        let rows = USER_LISTING
            .rows_query(window)
            .build_query_as::<UserSummaryRow>()
            .fetch_all(self.pool())
            .await?;
        let total: i64 = USER_LISTING
            .count_query(window)
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await?;

        Ok(Listing {
            rows: rows
                .into_iter()
                .map(UserSummary::try_from)
                .collect::<Result<_>>()?,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn create(&self, identity: &Identity) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                login_id, full_name, role, password_digest, pin_digest,
                user_status, email, phone, city, created_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(identity.login_id.as_str())
        .bind(&identity.full_name)
        .bind(&identity.role)
        .bind(&identity.credential_digest)
        .bind(&identity.pin_digest)
        .bind(identity.status.code())
        .bind(&identity.email)
        .bind(&identity.phone)
        .bind(identity.city)
        .bind(identity.created_at)
        .bind(&identity.created_by)
        .execute(self.pool())
        .await
        .map_err(|err| match AdminError::from(err) {
            AdminError::Conflict(_) => AdminError::Conflict(format!(
                "login id {} is already registered",
                identity.login_id
            )),
            other => other,
        })?;

        info!(login_id = %identity.login_id, "inserted user record");
        Ok(())
    }

    async fn update_profile(
        &self,
        login_id: &LoginId,
        changes: &UpdateUserRequest,
        stamp: &WriteStamp,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                full_name = COALESCE($1, full_name),
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                city = COALESCE($4, city),
                updated_at = $5,
                updated_by = $6
            WHERE login_id = $7
            "#,
        )
        .bind(&changes.full_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(changes.city)
        .bind(stamp.at)
        .bind(stamp.actor.as_str())
        .bind(login_id.as_str())
        .execute(self.pool())
        .await?;

        require_row(result.rows_affected(), login_id)
    }

    async fn update_status(
        &self,
        login_id: &LoginId,
        status: UserStatus,
        stamp: &WriteStamp,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET user_status = $1, updated_at = $2, updated_by = $3 \
             WHERE login_id = $4",
        )
        .bind(status.code())
        .bind(stamp.at)
        .bind(stamp.actor.as_str())
        .bind(login_id.as_str())
        .execute(self.pool())
        .await?;

        require_row(result.rows_affected(), login_id)
    }

    async fn update_credential_digest(
        &self,
        login_id: &LoginId,
        digest: &str,
        stamp: &WriteStamp,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET password_digest = $1, updated_at = $2, updated_by = $3 \
             WHERE login_id = $4",
        )
        .bind(digest)
        .bind(stamp.at)
        .bind(stamp.actor.as_str())
        .bind(login_id.as_str())
        .execute(self.pool())
        .await?;

        require_row(result.rows_affected(), login_id)
    }

    async fn update_pin_digest(
        &self,
        login_id: &LoginId,
        digest: &str,
        stamp: &WriteStamp,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET pin_digest = $1, updated_at = $2, updated_by = $3 \
             WHERE login_id = $4",
        )
        .bind(digest)
        .bind(stamp.at)
        .bind(stamp.actor.as_str())
        .bind(login_id.as_str())
        .execute(self.pool())
        .await?;

        require_row(result.rows_affected(), login_id)
    }
}
