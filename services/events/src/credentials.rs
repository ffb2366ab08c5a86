//! Password hashing and verification

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use thiserror::Error;

/// Errors raised by the credential store
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The cost parameters are out of range
    #[error("Invalid password hashing parameters: {0}")]
    Parameters(String),

    /// Hashing itself failed
    #[error("Failed to hash password: {0}")]
    Hash(String),

    /// The stored digest could not be parsed
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

/// Argon2 cost parameters
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_cost_kib: u32,
    /// Number of iterations
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordConfig {
    /// Create a new PasswordConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PASSWORD_MEMORY_COST_KIB`: Argon2 memory cost (default: 19456)
    /// - `PASSWORD_ITERATIONS`: Argon2 iterations (default: 2)
    /// - `PASSWORD_PARALLELISM`: Argon2 lanes (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let read = |key: &str, default: u32| {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };

        Self {
            memory_cost_kib: read("PASSWORD_MEMORY_COST_KIB", defaults.memory_cost_kib),
            iterations: read("PASSWORD_ITERATIONS", defaults.iterations),
            parallelism: read("PASSWORD_PARALLELISM", defaults.parallelism),
        }
    }
}

/// Salted, cost-parameterized password hashing
#[derive(Clone)]
pub struct CredentialStore {
    argon2: Argon2<'static>,
}

impl CredentialStore {
    /// Build a credential store with the given cost parameters
    pub fn new(config: &PasswordConfig) -> Result<Self, CredentialError> {
        let params = Params::new(
            config.memory_cost_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| CredentialError::Parameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password into a PHC string with a fresh salt
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut rand::thread_rng());

        let digest = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?
            .to_string();

        Ok(digest)
    }

    /// Check a plaintext password against a stored digest
    ///
    /// A mismatch is `Ok(false)`; only an unreadable digest is an error.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, CredentialError> {
        let parsed_hash =
            PasswordHash::new(digest).map_err(|e| CredentialError::MalformedHash(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CredentialError::MalformedHash(e.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_store() -> CredentialStore {
    // Cheap parameters so handler tests stay fast.
    CredentialStore::new(&PasswordConfig {
        memory_cost_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}
