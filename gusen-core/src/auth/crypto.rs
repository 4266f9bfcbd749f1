use std::{fmt, str::FromStr, sync::Arc};

use argon2::{
    Algorithm, Argon2, Params, ParamsBuilder, Version,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
};
use constant_time_eq::constant_time_eq;
use password_hash::Error as PasswordHashError;
use rand::{TryRngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("invalid Argon2 parameters: {0}")]
    InvalidArgon2Params(String),
    #[error("credential hashing error: {0}")]
    Hash(String),
    #[error("unknown credential scheme '{0}'")]
    UnknownScheme(String),
}

impl From<PasswordHashError> for CredentialError {
    fn from(err: PasswordHashError) -> Self {
        CredentialError::Hash(err.to_string())
    }
}

/// Which digest format passwords and PINs are stored in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CredentialScheme {
    /// Unsalted SHA-1, lowercase hex. Matches records written by the legacy
    /// back office.
    #[default]
    Sha1,
    /// Salted Argon2id PHC strings.
    Argon2id,
}

impl FromStr for CredentialScheme {
    type Err = CredentialError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sha1" | "legacy" => Ok(CredentialScheme::Sha1),
            "argon2" | "argon2id" => Ok(CredentialScheme::Argon2id),
            other => Err(CredentialError::UnknownScheme(other.to_string())),
        }
    }
}

impl fmt::Display for CredentialScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialScheme::Sha1 => f.write_str("sha1"),
            CredentialScheme::Argon2id => f.write_str("argon2id"),
        }
    }
}

/// One-way transform for passwords and PINs.
pub trait CredentialHasher: Send + Sync + fmt::Debug {
    fn scheme(&self) -> CredentialScheme;

    /// Produce the storable digest of `secret`.
    fn digest(&self, secret: &str) -> Result<String, CredentialError>;

    /// Check `secret` against a stored digest. A digest this scheme cannot
    /// parse is a mismatch, not an error.
    fn verify(&self, secret: &str, digest: &str) -> Result<bool, CredentialError>;
}

/// Build the hasher for a configured scheme.
pub fn hasher_for(
    scheme: CredentialScheme,
) -> Result<Arc<dyn CredentialHasher>, CredentialError> {
    Ok(match scheme {
        CredentialScheme::Sha1 => Arc::new(LegacySha1Hasher),
        CredentialScheme::Argon2id => Arc::new(Argon2Hasher::new()?),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySha1Hasher;

impl LegacySha1Hasher {
    /// Deterministic: the same secret always yields the same 40-char digest.
    pub fn hex_digest(secret: &str) -> String {
        hex::encode(Sha1::digest(secret.as_bytes()))
    }
}

impl CredentialHasher for LegacySha1Hasher {
    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::Sha1
    }

    fn digest(&self, secret: &str) -> Result<String, CredentialError> {
        Ok(Self::hex_digest(secret))
    }

    fn verify(&self, secret: &str, digest: &str) -> Result<bool, CredentialError> {
        let computed = Zeroizing::new(Self::hex_digest(secret));
        let stored = digest.trim().to_ascii_lowercase();
        Ok(constant_time_eq(computed.as_bytes(), stored.as_bytes()))
    }
}

pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

impl Argon2Hasher {
    const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
    const DEFAULT_ITERATIONS: u32 = 3;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = password_hash::Salt::RECOMMENDED_LENGTH;

    pub fn new() -> Result<Self, CredentialError> {
        Self::with_params(
            ParamsBuilder::new()
                .m_cost(Self::DEFAULT_MEMORY_KIB)
                .t_cost(Self::DEFAULT_ITERATIONS)
                .p_cost(Self::DEFAULT_PARALLELISM)
                .output_len(32)
                .build()
                .map_err(|err| {
                    CredentialError::InvalidArgon2Params(err.to_string())
                })?,
        )
    }

    /// Caller-specified cost parameters, e.g. cheap ones in tests.
    pub fn with_params(params: Params) -> Result<Self, CredentialError> {
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::default(), params),
        })
    }
}

impl CredentialHasher for Argon2Hasher {
    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::Argon2id
    }

    fn digest(&self, secret: &str) -> Result<String, CredentialError> {
        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| CredentialError::Hash(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)?;
        let hash = self.argon2.hash_password(secret.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn verify(&self, secret: &str, digest: &str) -> Result<bool, CredentialError> {
        let Ok(parsed) = PasswordHash::new(digest) else {
            tracing::debug!("stored digest is not a PHC string");
            return Ok(false);
        };
        Ok(self.argon2.verify_password(secret.as_bytes(), &parsed).is_ok())
    }
}
