use std::{fmt, sync::Arc};

use gusen_config::Config;
use gusen_core::{
    auth::{CredentialHasher, SessionGuard, SigningKey, TokenService},
    database::{CityStore, ClientStore, LogStore, UserStore},
    services::{
        ActivityLogService, AuthService, ClientDirectoryService, UserManagementService,
    },
};

/// Everything a request handler can reach. Cloned per request; all members
/// are shared handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserManagementService>,
    pub activity: Arc<ActivityLogService>,
    pub directory: Arc<ClientDirectoryService>,
    pub guard: Arc<SessionGuard>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Config,
        users: Arc<dyn UserStore>,
        logs: Arc<dyn LogStore>,
        clients: Arc<dyn ClientStore>,
        cities: Arc<dyn CityStore>,
        hasher: Arc<dyn CredentialHasher>,
        signing_key: &SigningKey,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(
            signing_key,
            config.auth.admin_role.clone(),
        ));

        Self {
            auth: Arc::new(AuthService::new(
                users.clone(),
                hasher.clone(),
                tokens.clone(),
            )),
            directory: Arc::new(ClientDirectoryService::new(
                users.clone(),
                clients,
                cities,
            )),
            users: Arc::new(UserManagementService::new(users, hasher)),
            activity: Arc::new(ActivityLogService::new(logs)),
            guard: Arc::new(SessionGuard::new(tokens)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
