//! Signed, Expiring Tokens
//!
//! HS256 JSON Web Tokens carrying an arbitrary serde claim set alongside
//! `iat` and `exp`. Each token purpose is expected to use its own secret,
//! so a token minted for one purpose never verifies under another.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token signing/verification errors
///
/// `Malformed`, `BadSignature` and `Expired` are distinguished for logging
/// only; callers are expected to treat them identically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token expiry is out of range")]
    InvalidExpiry,

    #[error("Token claims could not be encoded: {0}")]
    Encoding(String),
}

impl TokenError {
    /// Whether this is a verification failure (as opposed to a signing failure)
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::Malformed | Self::BadSignature | Self::Expired)
    }

    fn from_decode(err: JwtError) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            JwtErrorKind::InvalidSignature => Self::BadSignature,
            _ => Self::Malformed,
        }
    }
}

/// A freshly minted token and its absolute expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed, expiring tokens
pub trait TokenService: Send + Sync {
    fn sign<C: Serialize>(
        &self,
        claims: &C,
        secret: &[u8],
        expires_in: Duration,
    ) -> Result<SignedToken, TokenError>;

    fn verify<C: DeserializeOwned>(&self, token: &str, secret: &[u8]) -> Result<C, TokenError>;
}

#[derive(Serialize)]
struct SealedClaims<'a, C> {
    #[serde(flatten)]
    claims: &'a C,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct OpenedClaims<C> {
    #[serde(flatten)]
    claims: C,
    exp: i64,
}

/// HS256 token service
#[derive(Debug, Clone)]
pub struct HmacTokenService {
    validation: Validation,
}

impl HmacTokenService {
    pub fn new() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self { validation }
    }

    /// Sign as of a given instant
    pub fn sign_at<C: Serialize>(
        &self,
        claims: &C,
        secret: &[u8],
        expires_in: Duration,
        now: DateTime<Utc>,
    ) -> Result<SignedToken, TokenError> {
        let ttl = TimeDelta::from_std(expires_in).map_err(|_| TokenError::InvalidExpiry)?;
        let exp = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::InvalidExpiry)?
            .timestamp();
        let expires_at = DateTime::from_timestamp(exp, 0).ok_or(TokenError::InvalidExpiry)?;

        let sealed = SealedClaims {
            claims,
            iat: now.timestamp(),
            exp,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &sealed,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(SignedToken { token, expires_at })
    }
}

impl Default for HmacTokenService {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenService for HmacTokenService {
    fn sign<C: Serialize>(
        &self,
        claims: &C,
        secret: &[u8],
        expires_in: Duration,
    ) -> Result<SignedToken, TokenError> {
        self.sign_at(claims, secret, expires_in, Utc::now())
    }

    fn verify<C: DeserializeOwned>(&self, token: &str, secret: &[u8]) -> Result<C, TokenError> {
        let data = decode::<OpenedClaims<C>>(
            token,
            &DecodingKey::from_secret(secret),
            &self.validation,
        )
        .map_err(TokenError::from_decode)?;

        // jsonwebtoken accepts `exp == now`; a token is dead from its expiry second on.
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.claims)
    }
}
