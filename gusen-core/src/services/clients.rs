use std::{fmt, sync::Arc};

use gusen_model::{AssignClientRequest, City, ClientAssignment, ClientDetail, LoginId};
use tracing::info;

use crate::{
    database::{CityStore, ClientStore, UserStore},
    error::{AdminError, Result},
    identity::WriteStamp,
};

/// Client association for accounts, plus the reference lookups the admin
/// console needs when editing a profile.
pub struct ClientDirectoryService {
    users: Arc<dyn UserStore>,
    clients: Arc<dyn ClientStore>,
    cities: Arc<dyn CityStore>,
}

impl fmt::Debug for ClientDirectoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientDirectoryService").finish_non_exhaustive()
    }
}

impl ClientDirectoryService {
    pub fn new(
        users: Arc<dyn UserStore>,
        clients: Arc<dyn ClientStore>,
        cities: Arc<dyn CityStore>,
    ) -> Self {
        Self {
            users,
            clients,
            cities,
        }
    }

    pub async fn clients_of(&self, login_id: &str) -> Result<Vec<ClientAssignment>> {
        let login_id = LoginId::parse(login_id)?;
        self.require_user(&login_id).await?;
        self.clients.assignments_for(&login_id).await
    }

    pub async fn available_clients(&self) -> Result<Vec<ClientDetail>> {
        self.clients.unassigned("").await
    }

    /// Unassigned clients whose code contains `client_code`.
    pub async fn search_available(&self, client_code: &str) -> Result<Vec<ClientDetail>> {
        let fragment = client_code.trim();
        if fragment.is_empty() {
            return Err(AdminError::ValidationFailed(
                "client_code is required".into(),
            ));
        }
        self.clients.unassigned(fragment).await
    }

    pub async fn assign_client(
        &self,
        login_id: &str,
        request: &AssignClientRequest,
        actor: &LoginId,
    ) -> Result<ClientAssignment> {
        let login_id = LoginId::parse(login_id)?;
        let client_code = request.client_code.trim();
        if client_code.is_empty() {
            return Err(AdminError::ValidationFailed(
                "client_code must not be empty".into(),
            ));
        }

        self.require_user(&login_id).await?;
        if self.clients.find_client(client_code).await?.is_none() {
            return Err(AdminError::NotFound(format!("client {client_code}")));
        }

        let assignment = self
            .clients
            .assign(&login_id, client_code, &WriteStamp::now(actor))
            .await?;

        info!(login_id = %login_id, client_code, actor = %actor, "assigned client");
        Ok(assignment)
    }

    pub async fn cities(&self) -> Result<Vec<City>> {
        self.cities.list().await
    }

    async fn require_user(&self, login_id: &LoginId) -> Result<()> {
        match self.users.find_by_login_id(login_id).await? {
            Some(_) => Ok(()),
            None => Err(AdminError::NotFound(format!("user {login_id}"))),
        }
    }
}
