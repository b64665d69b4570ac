//! Session token format: `base64url(header).base64url(payload).base64url(hmac)`.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod ttl;

pub use claims::{Claims, ExtraClaims, NewClaims};
pub use error::AuthError;
pub use jwt::TokenCodec;
pub use ttl::{Ttl, DEFAULT_TTL};
