use axum::http::{Method, header::HeaderName};
use gusen_core::auth::CredentialScheme;
use thiserror::Error;

use super::models::{AuthConfig, Config, CorsConfig};

pub const MIN_SIGNING_KEY_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("AUTH_ADMIN_ROLE must not be empty")]
    EmptyAdminRole,
    #[error("authentication secret {field} {reason}")]
    WeakSecret { field: &'static str, reason: String },
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    enforce_auth(&config.auth, &mut warnings)?;
    validate_cors(&config.cors)?;

    if config.cors.is_wildcard_included() {
        warnings.push_with_hint(
            "CORS allows any origin",
            "List the admin console origins in CORS_ALLOWED_ORIGINS",
        );
    }

    if config.database.url.is_none() {
        warnings.push_with_hint(
            "No database URL configured",
            "Set DATABASE_URL or DATABASE_HOST/DATABASE_USER/DATABASE_NAME",
        );
    }

    Ok(warnings)
}

fn enforce_auth(
    auth: &AuthConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    if auth.admin_role.trim().is_empty() {
        return Err(ConfigGuardRailError::EmptyAdminRole);
    }

    match &auth.signing_key {
        Some(key) if key.len() < MIN_SIGNING_KEY_LENGTH => {
            return Err(ConfigGuardRailError::WeakSecret {
                field: "AUTH_SIGNING_KEY",
                reason: format!(
                    "must be at least {MIN_SIGNING_KEY_LENGTH} characters"
                ),
            });
        }
        Some(_) => {}
        None => warnings.push_with_hint(
            "AUTH_SIGNING_KEY not set; a random key will be generated and sessions end on restart",
            "Set AUTH_SIGNING_KEY to a random value of at least 32 characters",
        ),
    }

    if auth.credential_scheme == CredentialScheme::Sha1 {
        warnings.push_with_hint(
            "Credentials use the legacy unsalted SHA-1 scheme",
            "Set AUTH_CREDENTIAL_SCHEME=argon2id once stored digests are migrated",
        );
    }

    Ok(())
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    if cors.allowed_methods.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_METHODS must include at least one HTTP method"
                .into(),
        });
    }

    for method in &cors.allowed_methods {
        Method::from_bytes(method.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid HTTP method `{method}` in CORS_ALLOWED_METHODS"
                ),
            }
        })?;
    }

    for header in &cors.allowed_headers {
        HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid header `{header}` in CORS_ALLOWED_HEADERS"
                ),
            }
        })?;
    }

    Ok(())
}
