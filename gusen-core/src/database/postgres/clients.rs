use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gusen_model::{ClientAssignment, ClientDetail, LoginId};
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::{
    database::ports::ClientStore,
    error::{AdminError, Result},
    identity::WriteStamp,
    pagination::sql::like_pattern,
};

#[derive(Debug, FromRow)]
struct ClientRow {
    client_code: String,
    client_name: String,
}

impl From<ClientRow> for ClientDetail {
    fn from(row: ClientRow) -> Self {
        ClientDetail {
            client_code: row.client_code,
            client_name: row.client_name,
        }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    login_id: String,
    client_code: String,
    created_at: DateTime<Utc>,
    created_by: Option<String>,
}

impl TryFrom<AssignmentRow> for ClientAssignment {
    type Error = AdminError;

    fn try_from(row: AssignmentRow) -> Result<Self> {
        Ok(ClientAssignment {
            login_id: LoginId::parse(&row.login_id)?,
            client_code: row.client_code,
            created_at: row.created_at,
            created_by: row.created_by,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PostgresClientStore {
    pool: PgPool,
}

impl PostgresClientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PostgresClientStore {
    async fn find_client(&self, client_code: &str) -> Result<Option<ClientDetail>> {
        let row = sqlx::query_as::<_, ClientRow>(
            "SELECT client_code, client_name FROM clients WHERE client_code = $1",
        )
        .bind(client_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ClientDetail::from))
    }

    async fn assignments_for(&self, login_id: &LoginId) -> Result<Vec<ClientAssignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT login_id, client_code, created_at, created_by
            FROM user_clients
            WHERE login_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(login_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ClientAssignment::try_from).collect()
    }

    async fn unassigned(&self, code_fragment: &str) -> Result<Vec<ClientDetail>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT c.client_code, c.client_name
            FROM clients c
            WHERE NOT EXISTS (
                SELECT 1 FROM user_clients uc WHERE uc.client_code = c.client_code
            )
            AND ($1::TEXT IS NULL OR c.client_code LIKE $1 ESCAPE '\')
            ORDER BY c.client_code ASC
            "#,
        )
        .bind((!code_fragment.is_empty()).then(|| like_pattern(code_fragment)))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ClientDetail::from).collect())
    }

    async fn assign(
        &self,
        login_id: &LoginId,
        client_code: &str,
        stamp: &WriteStamp,
    ) -> Result<ClientAssignment> {
        let mut tx = self.pool.begin().await?;

        let holder: Option<String> = sqlx::query_scalar(
            "SELECT login_id FROM user_clients WHERE client_code = $1 FOR UPDATE",
        )
        .bind(client_code)
        .fetch_optional(&mut *tx)
        .await?;
        if let Some(holder) = holder.filter(|holder| holder != login_id.as_str()) {
            return Err(AdminError::Conflict(format!(
                "client {client_code} is already assigned to {holder}"
            )));
        }

        sqlx::query("DELETE FROM user_clients WHERE login_id = $1")
            .bind(login_id.as_str())
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            INSERT INTO user_clients (login_id, client_code, created_at, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING login_id, client_code, created_at, created_by
            "#,
        )
        .bind(login_id.as_str())
        .bind(client_code)
        .bind(stamp.at)
        .bind(stamp.actor.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(login_id = %login_id, client_code, "replaced client association");
        ClientAssignment::try_from(row)
    }
}
