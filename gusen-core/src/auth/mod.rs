//! Credential hashing, session tokens and the bearer-token guard.

pub mod crypto;
pub mod guard;
pub mod token;

pub use crypto::{
    Argon2Hasher, CredentialError, CredentialHasher, CredentialScheme,
    LegacySha1Hasher, hasher_for,
};
pub use guard::{AdminSession, GuardRejection, SessionGuard, extract_bearer_token};
pub use token::{
    IssuedToken, SESSION_LIFETIME_SECS, SessionClaims, SigningKey, TokenError,
    TokenRejection, TokenService,
};
