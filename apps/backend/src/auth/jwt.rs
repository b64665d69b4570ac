use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::alphabet;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::{DecodePaddingMode, GeneralPurpose};
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

use super::claims::{Claims, NewClaims};
use super::error::AuthError;
use super::ttl::Ttl;

type HmacSha256 = Hmac<Sha256>;

/// URL-safe alphabet, no padding on output, padding tolerated on input.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Fixed token header. Field order is the serialized key order.
#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

/// Signs and verifies HS256 session tokens with one shared secret.
///
/// Cloning is cheap; the secret is shared.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Arc<[u8]>,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenCodec {
    /// Build a codec. Minimum secret length or entropy is the caller's
    /// responsibility; only an empty secret is refused.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(AuthError::configuration("signing secret is empty"));
        }
        Ok(Self {
            secret: Arc::from(secret),
        })
    }

    /// Sign `claims` with a lifetime given as `<n><s|m|h|d>`.
    ///
    /// An unparseable `ttl` falls back to seven days.
    pub fn sign(&self, claims: NewClaims, ttl: &str) -> Result<String, AuthError> {
        self.sign_at(claims, ttl, SystemTime::now())
    }

    pub fn sign_at(
        &self,
        claims: NewClaims,
        ttl: &str,
        now: SystemTime,
    ) -> Result<String, AuthError> {
        self.sign_for(claims, Ttl::parse_lenient(ttl), now)
    }

    /// Sign with an already parsed lifetime (use with [`Ttl::parse_strict`]).
    pub fn sign_for(
        &self,
        claims: NewClaims,
        ttl: Ttl,
        now: SystemTime,
    ) -> Result<String, AuthError> {
        let iat = epoch_seconds(now);
        let exp = iat.saturating_add(ttl.as_secs());
        let claims = claims.stamp(iat, exp);

        let header =
            serde_json::to_vec(&HEADER).map_err(|e| AuthError::Encoding(e.to_string()))?;
        let payload =
            serde_json::to_vec(&claims).map_err(|e| AuthError::Encoding(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            BASE64URL.encode(header),
            BASE64URL.encode(payload)
        );
        let signature = self.signature(&signing_input)?;

        debug!(sub = %claims.sub, iat, exp, "issued session token");

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verify a token against the current clock.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, SystemTime::now())
    }

    /// Verify a token and return its claims.
    ///
    /// Errors:
    /// - not exactly three segments, bad base64 or bad JSON → `MalformedToken`
    /// - signature mismatch (compared in constant time) → `InvalidSignature`
    /// - `exp` present and `now > exp` → `TokenExpired`
    ///
    /// A payload without `exp` never expires.
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<Claims, AuthError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = segments[..] else {
            return Err(AuthError::MalformedToken);
        };

        let signing_input = &token[..header.len() + 1 + payload.len()];
        let expected = self.signature(signing_input)?;

        // ct_eq treats a length difference as inequality.
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            return Err(AuthError::InvalidSignature);
        }

        let payload = BASE64URL
            .decode(payload)
            .map_err(|_| AuthError::MalformedToken)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::MalformedToken)?;

        if let Some(exp) = claims.exp {
            if epoch_seconds(now) > exp {
                return Err(AuthError::TokenExpired);
            }
        }

        Ok(claims)
    }

    fn signature(&self, signing_input: &str) -> Result<String, AuthError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AuthError::configuration(format!("unusable signing key: {e}")))?;
        mac.update(signing_input.as_bytes());
        Ok(BASE64URL.encode(mac.finalize().into_bytes()))
    }
}

/// Seconds since the unix epoch; negative before it.
fn epoch_seconds(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}
