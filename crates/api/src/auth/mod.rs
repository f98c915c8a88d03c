//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Public and access token issuance, access-token validation.

pub mod jwt;
pub mod password;
