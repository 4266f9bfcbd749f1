use std::{fmt, sync::Arc};

use gusen_model::LoginId;
use tracing::{info, warn};

use crate::{
    auth::{CredentialHasher, IssuedToken, TokenService},
    database::UserStore,
    error::{AdminError, Result},
};

/// Administrator login: lookup, credential check, role gate, token issue.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<TokenService>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn login_admin(
        &self,
        login_id: &str,
        password: &str,
    ) -> Result<IssuedToken> {
        let login_id = LoginId::parse(login_id)?;

        let Some(identity) = self.users.find_by_login_id(&login_id).await? else {
            warn!(login_id = %login_id, "admin login rejected: unknown user");
            return Err(AdminError::AuthenticationFailed("user not found".into()));
        };

        if !self.hasher.verify(password, &identity.credential_digest)? {
            warn!(login_id = %login_id, "admin login rejected: bad password");
            return Err(AdminError::AuthenticationFailed("invalid password".into()));
        }

        if identity.role != self.tokens.admin_role() {
            warn!(
                login_id = %login_id,
                role = %identity.role,
                "admin login rejected: not an administrator"
            );
            return Err(AdminError::AuthorizationFailed("not admin".into()));
        }

        let issued = self
            .tokens
            .issue(&identity.login_id, &identity.role)
            .map_err(|err| AdminError::Internal(err.to_string()))?;

        info!(
            login_id = %identity.login_id,
            expires_at = %issued.expires_at,
            "issued admin session"
        );
        Ok(issued)
    }
}
