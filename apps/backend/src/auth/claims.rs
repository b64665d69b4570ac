//! Session token claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied claims beyond the registered ones.
pub type ExtraClaims = Map<String, Value>;

/// Keys owned by the codec; never taken from caller extras.
const RESERVED: [&str; 3] = ["sub", "iat", "exp"];

/// Claims handed to the codec at issuance time.
///
/// `iat` and `exp` are computed by the codec when signing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaims {
    pub sub: String,
    pub extra: ExtraClaims,
}

impl NewClaims {
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            extra: ExtraClaims::new(),
        }
    }

    /// Add an extra claim such as `email` or `role`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Stamp `iat`/`exp`, overwriting any caller-provided values.
    pub(crate) fn stamp(mut self, iat: i64, exp: i64) -> Claims {
        for key in RESERVED {
            self.extra.remove(key);
        }
        Claims {
            sub: self.sub,
            iat: Some(iat),
            exp: Some(exp),
            extra: self.extra,
        }
    }
}

/// Claims carried in a token payload.
///
/// `iat` and `exp` are optional on the way in: a payload without `exp` is
/// accepted and never expires. Tokens issued by this crate always carry both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id (users.id)
    pub sub: String,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: ExtraClaims,
}

impl Claims {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(Value::as_str)
    }

    pub fn role(&self) -> Option<&str> {
        self.get("role").and_then(Value::as_str)
    }
}
