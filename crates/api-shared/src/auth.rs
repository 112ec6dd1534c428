//! Shared-password mutation gate.
//!
//! Creating, editing and deleting recipes all require the single shared password. The
//! server is configured with the lowercase or uppercase hex SHA-256 digest of that password;
//! a submitted password is accepted when its digest matches.
//!
//! The comparison is a plain string equality, not constant-time.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Errors raised by the mutation gate.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The submitted password does not match the configured hash.
    #[error("unauthorized")]
    Unauthorized,

    /// The configured hash is not a hex SHA-256 digest.
    #[error("invalid password hash: {0}")]
    InvalidHash(String),
}

/// Returns the lowercase hex SHA-256 digest of `password`.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns true when `password` hashes to `configured_hash` (compared case-insensitively).
pub fn authorize(password: &str, configured_hash: &str) -> bool {
    hash_password(password) == configured_hash.to_ascii_lowercase()
}

/// The configured gate in front of every mutating operation.
#[derive(Clone)]
pub struct MutationGate {
    password_hash: String,
}

impl MutationGate {
    /// Creates a gate for the given hex SHA-256 digest.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidHash`] unless `password_hash` is 64 hex characters.
    pub fn new(password_hash: impl Into<String>) -> Result<Self, AuthError> {
        let password_hash = password_hash.into().trim().to_string();

        if password_hash.len() != SHA256_HEX_LEN
            || !password_hash.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(AuthError::InvalidHash(format!(
                "expected {} hex characters",
                SHA256_HEX_LEN
            )));
        }

        Ok(Self { password_hash })
    }

    pub fn authorize(&self, password: &str) -> bool {
        authorize(password, &self.password_hash)
    }

    /// Like [`MutationGate::authorize`], as a `Result` for `?` chains.
    pub fn require(&self, password: &str) -> Result<(), AuthError> {
        if self.authorize(password) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

// The hash is the credential; keep it out of logs.
impl std::fmt::Debug for MutationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationGate").finish_non_exhaustive()
    }
}
