use thiserror::Error;

/// Failures raised while signing or verifying session tokens.
///
/// The three token kinds are per-request conditions and collapse to
/// "not authenticated" at the session boundary. `Configuration` is a
/// deployment defect and must reach the caller as a server error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("malformed token")]
    MalformedToken,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    TokenExpired,
    #[error("auth configuration error: {0}")]
    Configuration(String),
    #[error("invalid ttl specifier: {0}")]
    InvalidTtl(String),
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl AuthError {
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration(detail.into())
    }

    /// True for failures that only mean "this request is not authenticated".
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken | AuthError::InvalidSignature | AuthError::TokenExpired
        )
    }

    /// Short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::Configuration(_) => "configuration",
            AuthError::InvalidTtl(_) => "invalid_ttl",
            AuthError::Encoding(_) => "encoding",
        }
    }
}
