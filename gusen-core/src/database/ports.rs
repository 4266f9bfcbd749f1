use async_trait::async_trait;
use gusen_model::{
    City, ClientAssignment, ClientDetail, LoginId, LoginLogEntry, UpdateUserRequest,
    UserStatus, UserSummary,
};

use crate::{
    error::Result,
    identity::{Identity, WriteStamp},
    pagination::{Listing, PageWindow},
};

/// Account persistence consumed by the auth and user-management use cases.
///
/// Writes that match no row report [`crate::AdminError::NotFound`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_login_id(&self, login_id: &LoginId) -> Result<Option<Identity>>;

    /// Accounts whose full name or email contains the keyword, ranked by
    /// creation time ascending.
    ///
    /// Ties on creation time follow the store's own order: insertion order
    /// in memory, login id ascending in PostgreSQL.
    async fn list(&self, window: &PageWindow) -> Result<Listing<UserSummary>>;

    /// Fails with `Conflict` when the login id is already taken.
    async fn create(&self, identity: &Identity) -> Result<()>;

    async fn update_profile(
        &self,
        login_id: &LoginId,
        changes: &UpdateUserRequest,
        stamp: &WriteStamp,
    ) -> Result<()>;

    async fn update_status(
        &self,
        login_id: &LoginId,
        status: UserStatus,
        stamp: &WriteStamp,
    ) -> Result<()>;

    async fn update_credential_digest(
        &self,
        login_id: &LoginId,
        digest: &str,
        stamp: &WriteStamp,
    ) -> Result<()>;

    async fn update_pin_digest(
        &self,
        login_id: &LoginId,
        digest: &str,
        stamp: &WriteStamp,
    ) -> Result<()>;
}

/// Read side of the login activity log.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Entries whose login id contains the keyword, most recent first.
    async fn list(&self, window: &PageWindow) -> Result<Listing<LoginLogEntry>>;
}

/// Client master list and the account-to-client association.
///
/// A client belongs to at most one account, and an account holds at most one
/// client.
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn find_client(&self, client_code: &str) -> Result<Option<ClientDetail>>;

    /// Empty when the account has no client.
    async fn assignments_for(&self, login_id: &LoginId) -> Result<Vec<ClientAssignment>>;

    /// Clients no account holds yet, ordered by client code. A non-empty
    /// fragment narrows the result to codes containing it.
    async fn unassigned(&self, code_fragment: &str) -> Result<Vec<ClientDetail>>;

    /// Replaces the account's association. Fails with `Conflict` when the
    /// client is held by a different account.
    async fn assign(
        &self,
        login_id: &LoginId,
        client_code: &str,
        stamp: &WriteStamp,
    ) -> Result<ClientAssignment>;
}

#[async_trait]
pub trait CityStore: Send + Sync {
    /// Every reference city, ordered by city code.
    async fn list(&self) -> Result<Vec<City>>;
}
