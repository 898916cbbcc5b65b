//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64url, hex)
//! - Password hashing (Argon2id)
//! - Signed, expiring tokens (HMAC-SHA256)

pub mod crypto;
pub mod password;
pub mod token;
