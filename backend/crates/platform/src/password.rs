//! Password Hashing and Verification
//!
//! Password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - A fresh random salt per hash, so equal inputs never share a hash
//! - Zeroization of sensitive data
//! - Constant-time comparison
//!
//! The [`CredentialHasher`] trait is the seam the auth core depends on;
//! [`Argon2Hasher`] is the production implementation.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// No stored hash to compare against (externally authenticated account)
    #[error("Password not set")]
    MissingHash,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("my_secure_password".to_string()).unwrap();
/// // Password is automatically zeroized when dropped
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with policy validation
    ///
    /// Validates:
    /// - Minimum 6 characters
    /// - Maximum 128 characters
    /// - No control characters
    /// - Not empty/whitespace only
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points (not bytes)
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters other than space, tab, newline
        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Wrap a login attempt without applying the registration policy
    ///
    /// Only NFKC normalization is applied so that the same input hashes
    /// and verifies identically.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// Includes algorithm identifier, version, parameters, salt and hash.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Salts, hashes and verifies credentials
pub trait CredentialHasher: Send + Sync {
    /// Hash with a fresh random salt; two calls with the same input differ.
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;

    /// Compare a clear text password against a stored hash.
    ///
    /// Fails with [`PasswordHashError::MissingHash`] when there is nothing
    /// stored, instead of comparing against an empty value.
    fn compare(
        &self,
        password: &ClearTextPassword,
        stored: Option<&HashedPassword>,
    ) -> Result<bool, PasswordHashError>;
}

/// Argon2id hasher with optional application-wide pepper
///
/// Defaults to the OWASP parameters (m=19456 KiB, t=2, p=1). Verification
/// always uses the parameters recorded in the stored PHC string.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    pepper: Option<Vec<u8>>,
    params: Params,
}

impl Argon2Hasher {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            pepper,
            params: Params::default(),
        }
    }

    /// Custom cost parameters (memory KiB, iterations, lanes)
    pub fn with_params(
        pepper: Option<Vec<u8>>,
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(Self { pepper, params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = password.peppered(self.pepper.as_deref());

        // Random salt (128 bits)
        let salt = SaltString::generate(OsRng);

        let hash = self
            .argon2()
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    fn compare(
        &self,
        password: &ClearTextPassword,
        stored: Option<&HashedPassword>,
    ) -> Result<bool, PasswordHashError> {
        let stored = stored.ok_or(PasswordHashError::MissingHash)?;

        let parsed_hash =
            PasswordHash::new(&stored.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        let password_bytes = password.peppered(self.pepper.as_deref());

        // Argon2 uses constant-time comparison internally
        Ok(self
            .argon2()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::for_verification(s.to_string())
    }

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "ab".repeat(MAX_PASSWORD_LENGTH);
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("        ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("abc\u{7}defgh".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_six_characters_is_enough() {
        for short in ["test12", "test123", "password", "aaaaaa"] {
            assert!(
                ClearTextPassword::new(short.to_string()).is_ok(),
                "{short} should be accepted"
            );
        }
        let result = ClearTextPassword::new("test1".to_string());
        assert_eq!(
            result.err(),
            Some(PasswordPolicyError::TooShort { min: 6, actual: 5 })
        );
    }

    #[test]
    fn test_valid_passwords() {
        assert!(ClearTextPassword::new("Secret1!".to_string()).is_ok());
        assert!(ClearTextPassword::new("MySecure#Pass2024!".to_string()).is_ok());
        assert!(ClearTextPassword::new("パスワード安全です!".to_string()).is_ok());
    }

    #[test]
    fn test_same_input_hashes_differ_but_both_verify() {
        let hasher = Argon2Hasher::default();
        let password = pw("Secret1!");

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();
        assert_ne!(first.as_phc_string(), second.as_phc_string());

        assert!(hasher.compare(&password, Some(&first)).unwrap());
        assert!(hasher.compare(&password, Some(&second)).unwrap());
    }

    #[test]
    fn test_wrong_password_does_not_verify() {
        let hasher = Argon2Hasher::default();
        let hashed = hasher.hash(&pw("Secret1!")).unwrap();
        assert!(!hasher.compare(&pw("Secret2!"), Some(&hashed)).unwrap());
    }

    #[test]
    fn test_missing_hash_is_rejected() {
        let hasher = Argon2Hasher::default();
        let result = hasher.compare(&pw("Secret1!"), None);
        assert!(matches!(result, Err(PasswordHashError::MissingHash)));
    }

    #[test]
    fn test_pepper_must_match() {
        let peppered = Argon2Hasher::new(Some(b"my_secret_pepper".to_vec()));
        let plain = Argon2Hasher::default();
        let password = pw("TestPassword123!");

        let hashed = peppered.hash(&password).unwrap();
        assert!(peppered.compare(&password, Some(&hashed)).unwrap());
        assert!(!plain.compare(&password, Some(&hashed)).unwrap());
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = Argon2Hasher::default();
        let password = pw("TestPassword123!");
        let hashed = hasher.hash(&password).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.compare(&password, Some(&restored)).unwrap());
    }

    #[test]
    fn test_custom_params_are_recorded_in_hash() {
        let cheap = Argon2Hasher::with_params(None, 1024, 1, 1).unwrap();
        let password = pw("TestPassword123!");
        let hashed = cheap.hash(&password).unwrap();

        assert!(hashed.as_phc_string().contains("m=1024,t=1,p=1"));
        // Any instance verifies using the stored parameters
        assert!(Argon2Hasher::default().compare(&password, Some(&hashed)).unwrap());
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(Argon2Hasher::with_params(None, 1, 0, 1).is_err());
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = pw("secret-value");
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret-value"));
    }
}
