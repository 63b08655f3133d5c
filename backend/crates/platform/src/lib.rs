//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the catalog backend:
//! - Cryptographic utilities (base64url, secure randomness)
//! - Password hashing (Argon2id) used as the one-way credential verifier

pub mod crypto;
pub mod password;
