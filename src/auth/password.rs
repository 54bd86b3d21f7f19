//! Password hashing with bcrypt

use anyhow::{Context, Result};
use bcrypt::{hash, verify};

/// Hashes and checks passwords at a fixed bcrypt cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        hash(password, self.cost).context("Failed to hash password")
    }

    pub fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        verify(password, password_hash).context("Failed to verify password")
    }
}
