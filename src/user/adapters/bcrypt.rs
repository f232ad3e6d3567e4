//! `bcrypt` implementation of the `PasswordHasher` port.

use crate::user::{
    domain::PasswordHash,
    ports::{HashingError, PasswordHasher},
};

/// Password hasher backed by the `bcrypt` crate.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Creates a hasher with the given work factor.
    ///
    /// Costs below 4 or above 31 are rejected by `bcrypt` at hashing time.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Returns the configured work factor.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, HashingError> {
        bcrypt::hash(password, self.cost)
            .map(PasswordHash::from_hash)
            .map_err(HashingError::new)
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, HashingError> {
        bcrypt::verify(password, hash.as_str()).map_err(HashingError::new)
    }
}
