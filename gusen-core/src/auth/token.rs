use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use gusen_model::LoginId;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use rand::{TryRngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Sessions live for two hours from issuance.
pub const SESSION_LIFETIME_SECS: i64 = 2 * 60 * 60;

/// Claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub login_id: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing key must not be empty")]
    EmptySigningKey,
    #[error("failed to generate signing key: {0}")]
    KeyGeneration(String),
    #[error("failed to sign session token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token role is not the administrative role")]
    RoleMismatch,
}

/// HMAC secret shared by issuance and validation for the life of the process.
#[derive(Clone)]
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    pub const GENERATED_LEN: usize = 32;

    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(TokenError::EmptySigningKey);
        }
        Ok(Self(Zeroizing::new(secret.to_vec())))
    }

    /// Random key from the OS RNG. Tokens signed with it do not survive
    /// a restart.
    pub fn generate() -> Result<Self, TokenError> {
        let mut bytes = Zeroizing::new(vec![0u8; Self::GENERATED_LEN]);
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| TokenError::KeyGeneration(err.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// Issues and validates HS256 session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    admin_role: String,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("admin_role", &self.admin_role)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(key: &SigningKey, admin_role: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the caller's clock in `validate_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(&key.0),
            decoding: DecodingKey::from_secret(&key.0),
            validation,
            admin_role: admin_role.into(),
        }
    }

    pub fn admin_role(&self) -> &str {
        &self.admin_role
    }

    pub fn issue(
        &self,
        login_id: &LoginId,
        role: &str,
    ) -> Result<IssuedToken, TokenError> {
        self.issue_at(login_id, role, Utc::now())
    }

    pub fn issue_at(
        &self,
        login_id: &LoginId,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        // Claims carry whole seconds; the reported instants must agree.
        let now = Utc.timestamp_opt(now.timestamp(), 0).single().unwrap_or(now);
        let expires_at = now + Duration::seconds(SESSION_LIFETIME_SECS);
        let claims = SessionClaims {
            login_id: login_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token =
            encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        Ok(IssuedToken {
            token,
            issued_at: now,
            expires_at,
        })
    }

    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenRejection> {
        self.validate_at(token, Utc::now())
    }

    /// Checks, in order: structure, signature, expiry (a token is dead at
    /// exactly `exp`), then the role claim.
    pub fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, TokenRejection> {
        let claims = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                _ => TokenRejection::Malformed,
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenRejection::Expired);
        }

        if claims.role != self.admin_role {
            return Err(TokenRejection::RoleMismatch);
        }

        Ok(claims)
    }
}

impl SessionClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
