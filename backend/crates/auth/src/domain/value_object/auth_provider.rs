//! Auth Provider Value Object
//!
//! How an account authenticates. Only `Email` accounts carry a password.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum AuthProvider {
    #[default]
    Email = 0,
    Google = 1,
    Facebook = 2,
    Apple = 3,
}

impl AuthProvider {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use AuthProvider::*;
        match self {
            Email => "email",
            Google => "google",
            Facebook => "facebook",
            Apple => "apple",
        }
    }

    #[inline]
    pub const fn uses_password(&self) -> bool {
        matches!(self, AuthProvider::Email)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use AuthProvider::*;
        match id {
            0 => Some(Email),
            1 => Some(Google),
            2 => Some(Facebook),
            3 => Some(Apple),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use AuthProvider::*;
        match code {
            "email" => Some(Email),
            "google" => Some(Google),
            "facebook" => Some(Facebook),
            "apple" => Some(Apple),
            _ => None,
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
