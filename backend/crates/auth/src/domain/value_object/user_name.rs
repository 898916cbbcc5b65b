//! User Name Value Object
//!
//! ユーザー名は、メールアドレスのローカル部から自動生成される公開ハンドル。
//! 重複した場合は登録処理側でランダムなサフィックスを付与する。
//!
//! ## 不変条件
//! - 使用可能文字: a-z, 0-9, `.`, `_`, `-`
//! - ベース部分は最大30文字
//! - 空になった場合は `user`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_object::email::Email;

/// Maximum length of the derived base (before any suffix)
pub const USER_NAME_BASE_MAX_LENGTH: usize = 30;

/// Length of the collision suffix
pub const USER_NAME_SUFFIX_LENGTH: usize = 5;

const FALLBACK_USER_NAME: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Derive a handle from the email's local part
    pub fn from_email(email: &Email) -> Self {
        let base: String = sanitize(email.local_part())
            .take(USER_NAME_BASE_MAX_LENGTH)
            .collect();

        if base.is_empty() {
            Self(FALLBACK_USER_NAME.to_string())
        } else {
            Self(base)
        }
    }

    /// Same handle with a disambiguating suffix appended
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let suffix: String = sanitize(suffix).take(USER_NAME_SUFFIX_LENGTH).collect();
        Self(format!("{}{}", self.0, suffix))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(user_name: impl Into<String>) -> Self {
        Self(user_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

fn sanitize(raw: &str) -> impl Iterator<Item = char> + '_ {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
