use async_trait::async_trait;
use gusen_model::{
    City, ClientAssignment, ClientDetail, LoginId, LoginLogEntry, UpdateUserRequest,
    UserStatus, UserSummary,
};
use parking_lot::RwLock;

use crate::{
    error::{AdminError, Result},
    identity::{Identity, WriteStamp},
    pagination::{self, Listing, PageWindow, SortDirection, matches_keyword},
};

use super::ports::{CityStore, ClientStore, LogStore, UserStore};

/// Process-local account store. Insertion order is storage order.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<Identity>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = Identity>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    pub fn insert(&self, identity: Identity) {
        self.users.write().push(identity);
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    fn modify(
        &self,
        login_id: &LoginId,
        stamp: &WriteStamp,
        apply: impl FnOnce(&mut Identity),
    ) -> Result<()> {
        let mut users = self.users.write();
        let identity = users
            .iter_mut()
            .find(|identity| &identity.login_id == login_id)
            .ok_or_else(|| AdminError::NotFound(format!("user {login_id}")))?;
        apply(identity);
        identity.updated_at = Some(stamp.at);
        identity.updated_by = Some(stamp.actor.to_string());
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_login_id(&self, login_id: &LoginId) -> Result<Option<Identity>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|identity| &identity.login_id == login_id)
            .cloned())
    }

    async fn list(&self, window: &PageWindow) -> Result<Listing<UserSummary>> {
        let users = self.users.read();
        let keyword = window.keyword();
        let listing = pagination::window(
            users.as_slice(),
            |identity| {
                matches_keyword(&identity.full_name, keyword)
                    || identity
                        .email
                        .as_deref()
                        .is_some_and(|email| matches_keyword(email, keyword))
            },
            |identity| identity.created_at,
            SortDirection::Ascending,
            window,
        );
        Ok(Listing {
            rows: listing.rows.iter().map(Identity::summary).collect(),
            total: listing.total,
        })
    }

    async fn create(&self, identity: &Identity) -> Result<()> {
        let mut users = self.users.write();
        if users.iter().any(|existing| existing.login_id == identity.login_id) {
            return Err(AdminError::Conflict(format!(
                "login id {} is already registered",
                identity.login_id
            )));
        }
        users.push(identity.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        login_id: &LoginId,
        changes: &UpdateUserRequest,
        stamp: &WriteStamp,
    ) -> Result<()> {
        self.modify(login_id, stamp, |identity| {
            if let Some(full_name) = &changes.full_name {
                identity.full_name = full_name.clone();
            }
            if let Some(email) = &changes.email {
                identity.email = Some(email.clone());
            }
            if let Some(phone) = &changes.phone {
                identity.phone = Some(phone.clone());
            }
            if let Some(city) = changes.city {
                identity.city = Some(city);
            }
        })
    }

    async fn update_status(
        &self,
        login_id: &LoginId,
        status: UserStatus,
        stamp: &WriteStamp,
    ) -> Result<()> {
        self.modify(login_id, stamp, |identity| identity.status = status)
    }

    async fn update_credential_digest(
        &self,
        login_id: &LoginId,
        digest: &str,
        stamp: &WriteStamp,
    ) -> Result<()> {
        self.modify(login_id, stamp, |identity| {
            identity.credential_digest = digest.to_string();
        })
    }

    async fn update_pin_digest(
        &self,
        login_id: &LoginId,
        digest: &str,
        stamp: &WriteStamp,
    ) -> Result<()> {
        self.modify(login_id, stamp, |identity| {
            identity.pin_digest = digest.to_string();
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLogStore {
    entries: RwLock<Vec<LoginLogEntry>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = LoginLogEntry>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }

    pub fn push(&self, entry: LoginLogEntry) {
        self.entries.write().push(entry);
    }
}

#[async_trait]
impl LogStore for InMemoryLogStore {
    async fn list(&self, window: &PageWindow) -> Result<Listing<LoginLogEntry>> {
        let entries = self.entries.read();
        Ok(pagination::window(
            entries.as_slice(),
            |entry| matches_keyword(&entry.login_id, window.keyword()),
            |entry| entry.action_at,
            SortDirection::Descending,
            window,
        ))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    clients: RwLock<Vec<ClientDetail>>,
    assignments: RwLock<Vec<ClientAssignment>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(clients: impl IntoIterator<Item = ClientDetail>) -> Self {
        Self {
            clients: RwLock::new(clients.into_iter().collect()),
            assignments: RwLock::default(),
        }
    }

    /// Seed an association without the master-list or ownership checks.
    pub fn link(&self, assignment: ClientAssignment) {
        self.assignments.write().push(assignment);
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn find_client(&self, client_code: &str) -> Result<Option<ClientDetail>> {
        Ok(self
            .clients
            .read()
            .iter()
            .find(|client| client.client_code == client_code)
            .cloned())
    }

    async fn assignments_for(&self, login_id: &LoginId) -> Result<Vec<ClientAssignment>> {
        Ok(self
            .assignments
            .read()
            .iter()
            .filter(|assignment| &assignment.login_id == login_id)
            .cloned()
            .collect())
    }

    async fn unassigned(&self, code_fragment: &str) -> Result<Vec<ClientDetail>> {
        let assignments = self.assignments.read();
        let mut clients: Vec<ClientDetail> = self
            .clients
            .read()
            .iter()
            .filter(|client| {
                !assignments
                    .iter()
                    .any(|assignment| assignment.client_code == client.client_code)
            })
            .filter(|client| matches_keyword(&client.client_code, code_fragment))
            .cloned()
            .collect();
        clients.sort_by(|a, b| a.client_code.cmp(&b.client_code));
        Ok(clients)
    }

    async fn assign(
        &self,
        login_id: &LoginId,
        client_code: &str,
        stamp: &WriteStamp,
    ) -> Result<ClientAssignment> {
        let mut assignments = self.assignments.write();
        if let Some(holder) = assignments.iter().find(|assignment| {
            assignment.client_code == client_code && &assignment.login_id != login_id
        }) {
            return Err(AdminError::Conflict(format!(
                "client {client_code} is already assigned to {}",
                holder.login_id
            )));
        }

        assignments.retain(|assignment| &assignment.login_id != login_id);
        let assignment = ClientAssignment {
            login_id: login_id.clone(),
            client_code: client_code.to_string(),
            created_at: stamp.at,
            created_by: Some(stamp.actor.to_string()),
        };
        assignments.push(assignment.clone());
        Ok(assignment)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCityStore {
    cities: RwLock<Vec<City>>,
}

impl InMemoryCityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cities(cities: impl IntoIterator<Item = City>) -> Self {
        Self {
            cities: RwLock::new(cities.into_iter().collect()),
        }
    }
}

#[async_trait]
impl CityStore for InMemoryCityStore {
    async fn list(&self) -> Result<Vec<City>> {
        let mut cities = self.cities.read().clone();
        cities.sort_by_key(|city| city.city_code);
        Ok(cities)
    }
}
