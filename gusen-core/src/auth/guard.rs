use std::sync::Arc;

use chrono::{DateTime, Utc};
use gusen_model::LoginId;
use thiserror::Error;

use super::token::{TokenRejection, TokenService};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Reason a protected call was refused before reaching its use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardRejection {
    #[error("authorization header is missing")]
    MissingHeader,
    #[error("authorization header is not a bearer credential")]
    MalformedHeader,
    #[error(transparent)]
    Token(#[from] TokenRejection),
}

/// The administrator a validated token speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub login_id: LoginId,
    pub role: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(
    header: Option<&str>,
) -> Result<&str, GuardRejection> {
    let header = header.ok_or(GuardRejection::MissingHeader)?;
    match header.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(GuardRejection::MalformedHeader),
    }
}

#[derive(Debug, Clone)]
pub struct SessionGuard {
    tokens: Arc<TokenService>,
}

impl SessionGuard {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn authorize(
        &self,
        header: Option<&str>,
    ) -> Result<AdminSession, GuardRejection> {
        self.authorize_at(header, Utc::now())
    }

    pub fn authorize_at(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AdminSession, GuardRejection> {
        let token = extract_bearer_token(header)?;
        let claims = self.tokens.validate_at(token, now)?;
        let login_id = LoginId::parse(&claims.login_id)
            .map_err(|_| GuardRejection::Token(TokenRejection::Malformed))?;

        Ok(AdminSession {
            expires_at: claims.expires_at(),
            login_id,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::auth::token::{SESSION_LIFETIME_SECS, SigningKey};

    fn guard() -> (SessionGuard, Arc<TokenService>) {
        let key = SigningKey::generate().unwrap();
        let tokens = Arc::new(TokenService::new(&key, "ADMIN"));
        (SessionGuard::new(tokens.clone()), tokens)
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_bearer_token(None), Err(GuardRejection::MissingHeader));
        for header in ["", "Bearer ", "Bearer    ", "Basic abc", "bearer abc", "Token abc"] {
            assert_eq!(
                extract_bearer_token(Some(header)),
                Err(GuardRejection::MalformedHeader),
                "header {header:?}"
            );
        }
        assert_eq!(extract_bearer_token(Some("Bearer abc.def")), Ok("abc.def"));
    }

    #[test]
    fn valid_admin_token_yields_session() {
        let (guard, tokens) = guard();
        let id = LoginId::parse("admin1").unwrap();
        let issued = tokens.issue(&id, "ADMIN").unwrap();
        let header = format!("Bearer {}", issued.token);

        let session = guard.authorize(Some(&header)).unwrap();
        assert_eq!(session.login_id.as_str(), "ADMIN1");
        assert_eq!(session.role, "ADMIN");
    }

    #[test]
    fn token_failures_surface_their_reason() {
        let (guard, tokens) = guard();
        let id = LoginId::parse("ops").unwrap();
        let now = Utc::now();

        let teller = tokens.issue_at(&id, "TELLER", now).unwrap();
        assert_eq!(
            guard.authorize_at(Some(&format!("Bearer {}", teller.token)), now),
            Err(GuardRejection::Token(TokenRejection::RoleMismatch))
        );

        let admin = tokens.issue_at(&id, "ADMIN", now).unwrap();
        let later = now + Duration::seconds(SESSION_LIFETIME_SECS);
        assert_eq!(
            guard.authorize_at(Some(&format!("Bearer {}", admin.token)), later),
            Err(GuardRejection::Token(TokenRejection::Expired))
        );
    }
}
