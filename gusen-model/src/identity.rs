use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Unique, uppercase identifier an administrator or customer logs in with.
///
/// Construction trims surrounding whitespace and uppercases the value, so two
/// spellings that differ only in case always name the same account.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct LoginId(String);

impl LoginId {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyLoginId);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LoginId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<LoginId> for String {
    fn from(value: LoginId) -> Self {
        value.0
    }
}

impl AsRef<str> for LoginId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Account lifecycle state. Accounts only move from `Active` to `Suspended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    /// Single-letter code persisted in the `user_status` column.
    pub fn code(self) -> &'static str {
        match self {
            UserStatus::Active => "N",
            UserStatus::Suspended => "S",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim() {
            "N" => Ok(UserStatus::Active),
            "S" => Ok(UserStatus::Suspended),
            other => Err(ModelError::UnknownStatusCode(other.to_string())),
        }
    }
}

/// Row returned by the user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub login_id: LoginId,
    pub full_name: String,
    pub status: UserStatus,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Full account view. Credential and PIN digests are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub login_id: LoginId,
    pub full_name: String,
    pub role: String,
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

#[derive(Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub login_id: String,
    pub full_name: String,
    pub password: String,
    pub pin: String,
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<i32>,
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("login_id", &self.login_id)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Partial profile update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<i32>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.city.is_none()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    pub password: String,
}

impl fmt::Debug for PasswordChangeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChangeRequest").finish_non_exhaustive()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct PinChangeRequest {
    pub pin: String,
}

impl fmt::Debug for PinChangeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinChangeRequest").finish_non_exhaustive()
    }
}
