use std::fmt;

use chrono::{DateTime, Utc};
use gusen_model::{LoginId, UserDetail, UserStatus, UserSummary};

/// Stored account record, digests included. Never serialized directly; the
/// HTTP layer only sees [`UserSummary`] and [`UserDetail`].
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    /// Immutable once the record exists.
    pub login_id: LoginId,
    pub full_name: String,
    /// Compared against the configured administrative role at login.
    pub role: String,
    pub credential_digest: String,
    pub pin_digest: String,
    pub status: UserStatus,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<i32>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("login_id", &self.login_id)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl Identity {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            login_id: self.login_id.clone(),
            full_name: self.full_name.clone(),
            status: self.status,
            role: self.role.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn detail(&self) -> UserDetail {
        UserDetail {
            login_id: self.login_id.clone(),
            full_name: self.full_name.clone(),
            role: self.role.clone(),
            status: self.status,
            email: self.email.clone(),
            phone: self.phone.clone(),
            city: self.city,
            last_login: self.last_login,
            created_at: self.created_at,
            created_by: self.created_by.clone(),
            updated_at: self.updated_at,
            updated_by: self.updated_by.clone(),
        }
    }
}

/// Who performed a write, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStamp {
    pub actor: LoginId,
    pub at: DateTime<Utc>,
}

impl WriteStamp {
    pub fn now(actor: &LoginId) -> Self {
        Self {
            actor: actor.clone(),
            at: Utc::now(),
        }
    }
}
