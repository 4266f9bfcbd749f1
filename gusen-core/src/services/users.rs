use std::{fmt, sync::Arc};

use chrono::Utc;
use gusen_model::{
    CreateUserRequest, LoginId, Page, PageRequest, UpdateUserRequest, UserDetail,
    UserStatus, UserSummary,
};
use tracing::info;

use crate::{
    auth::CredentialHasher,
    database::UserStore,
    error::{AdminError, Result},
    identity::{Identity, WriteStamp},
    pagination::PageWindow,
};

pub const PIN_LENGTH: usize = 6;

/// PINs are exactly six characters; the content is not otherwise checked.
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.chars().count() != PIN_LENGTH {
        return Err(AdminError::ValidationFailed(format!(
            "pin must be exactly {PIN_LENGTH} characters"
        )));
    }
    Ok(())
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdminError::ValidationFailed(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

pub struct UserManagementService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl fmt::Debug for UserManagementService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserManagementService")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl UserManagementService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn list_users(&self, request: &PageRequest) -> Result<Page<UserSummary>> {
        let listing = self.users.list(&PageWindow::from(request)).await?;
        Ok(listing.into_page(request))
    }

    pub async fn get_user(&self, login_id: &str) -> Result<UserDetail> {
        let login_id = LoginId::parse(login_id)?;
        Ok(self.require(&login_id).await?.detail())
    }

    pub async fn create_user(
        &self,
        request: CreateUserRequest,
        actor: &LoginId,
    ) -> Result<UserDetail> {
        let login_id = LoginId::parse(&request.login_id)?;
        require_non_blank("full_name", &request.full_name)?;
        require_non_blank("password", &request.password)?;
        require_non_blank("role", &request.role)?;
        validate_pin(&request.pin)?;

        if self.users.find_by_login_id(&login_id).await?.is_some() {
            return Err(AdminError::Conflict(format!(
                "login id {login_id} is already registered"
            )));
        }

        let identity = Identity {
            login_id,
            full_name: request.full_name.trim().to_string(),
            role: request.role.trim().to_string(),
            credential_digest: self.hasher.digest(&request.password)?,
            pin_digest: self.hasher.digest(&request.pin)?,
            status: UserStatus::Active,
            email: request.email,
            phone: request.phone,
            city: request.city,
            last_login: None,
            created_at: Utc::now(),
            created_by: Some(actor.to_string()),
            updated_at: None,
            updated_by: None,
        };
        self.users.create(&identity).await?;

        info!(login_id = %identity.login_id, actor = %actor, "created user");
        Ok(identity.detail())
    }

    pub async fn update_user(
        &self,
        login_id: &str,
        changes: UpdateUserRequest,
        actor: &LoginId,
    ) -> Result<UserDetail> {
        let login_id = LoginId::parse(login_id)?;
        if changes.is_empty() {
            return Err(AdminError::ValidationFailed("no fields to update".into()));
        }
        if let Some(full_name) = &changes.full_name {
            require_non_blank("full_name", full_name)?;
        }

        self.users
            .update_profile(&login_id, &changes, &WriteStamp::now(actor))
            .await?;

        info!(login_id = %login_id, actor = %actor, "updated user profile");
        Ok(self.require(&login_id).await?.detail())
    }

    pub async fn deactivate(&self, login_id: &str, actor: &LoginId) -> Result<()> {
        let login_id = LoginId::parse(login_id)?;
        self.users
            .update_status(&login_id, UserStatus::Suspended, &WriteStamp::now(actor))
            .await?;

        info!(login_id = %login_id, actor = %actor, "deactivated user");
        Ok(())
    }

    pub async fn reset_password(
        &self,
        login_id: &str,
        new_password: &str,
        actor: &LoginId,
    ) -> Result<()> {
        let login_id = LoginId::parse(login_id)?;
        require_non_blank("password", new_password)?;

        let digest = self.hasher.digest(new_password)?;
        self.users
            .update_credential_digest(&login_id, &digest, &WriteStamp::now(actor))
            .await?;

        info!(login_id = %login_id, actor = %actor, "reset user password");
        Ok(())
    }

    pub async fn reset_pin(
        &self,
        login_id: &str,
        new_pin: &str,
        actor: &LoginId,
    ) -> Result<()> {
        let login_id = LoginId::parse(login_id)?;
        validate_pin(new_pin)?;

        let digest = self.hasher.digest(new_pin)?;
        self.users
            .update_pin_digest(&login_id, &digest, &WriteStamp::now(actor))
            .await?;

        info!(login_id = %login_id, actor = %actor, "reset user pin");
        Ok(())
    }

    async fn require(&self, login_id: &LoginId) -> Result<Identity> {
        self.users
            .find_by_login_id(login_id)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("user {login_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_must_be_six_characters() {
        for pin in ["", "12345", "1234567", "12 45"] {
            assert!(matches!(
                validate_pin(pin),
                Err(AdminError::ValidationFailed(_))
            ));
        }
        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin("12345é").is_ok());
    }
}
