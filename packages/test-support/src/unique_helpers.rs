//! Unique test data so parallel tests never share subjects or secrets.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique address under the reserved `example.test` domain.
///
/// ```
/// use afix_test_support::unique_helpers::unique_email;
///
/// let a = unique_email("client");
/// let b = unique_email("client");
/// assert_ne!(a, b);
/// assert!(a.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}

/// A throwaway signing secret.
pub fn unique_secret() -> String {
    format!("test-secret-{}", Ulid::new())
}
