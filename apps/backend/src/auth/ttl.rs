//! Token lifetime specifiers such as `30m`, `12h` or `7d`.

use std::time::Duration;

use lazy_regex::regex_captures;

use super::error::AuthError;

/// Lifetime used when a specifier cannot be parsed.
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// A parsed token lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl(Duration);

impl Ttl {
    /// Parse `^(\d+)([smhd])$`, falling back to [`DEFAULT_TTL`] on anything
    /// else. Unparseable input is not an error on this path.
    pub fn parse_lenient(input: &str) -> Self {
        match Self::parse_strict(input) {
            Ok(ttl) => ttl,
            Err(_) => {
                tracing::debug!(input, "unrecognized ttl specifier, using default");
                Self(DEFAULT_TTL)
            }
        }
    }

    /// Parse `^(\d+)([smhd])$` and reject anything else.
    pub fn parse_strict(input: &str) -> Result<Self, AuthError> {
        let (_, magnitude, unit) = regex_captures!(r"^(\d+)([smhd])$", input)
            .ok_or_else(|| AuthError::InvalidTtl(input.to_string()))?;

        let magnitude: u64 = magnitude
            .parse()
            .map_err(|_| AuthError::InvalidTtl(input.to_string()))?;

        let unit_secs = match unit {
            "s" => 1,
            "m" => 60,
            "h" => 60 * 60,
            _ => 24 * 60 * 60,
        };

        // Keep the result representable as i64 seconds for `exp`.
        magnitude
            .checked_mul(unit_secs)
            .filter(|secs| i64::try_from(*secs).is_ok())
            .map(|secs| Self(Duration::from_secs(secs)))
            .ok_or_else(|| AuthError::InvalidTtl(input.to_string()))
    }

    pub fn as_secs(&self) -> i64 {
        // parse_strict guarantees the value fits
        self.0.as_secs() as i64
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Self(DEFAULT_TTL)
    }
}
