//! Password hash verification.
//!
//! Two stored formats are understood:
//! - bcrypt (`$2a$`, `$2b$`, `$2y$`), as written into `users.password_hash`
//!   by the account tooling that feeds the REST store.
//! - `blake3$<salt hex>$<digest hex>`, digest = blake3(salt || password),
//!   which the in-memory store issues for local and test users.

use subtle::ConstantTimeEq;
use tracing::warn;
use uuid::Uuid;

const BLAKE3_SCHEME: &str = "blake3";
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Hash for the in-memory store.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{BLAKE3_SCHEME}${salt}${}", digest(&salt, password))
}

/// Check `password` against a stored hash.
///
/// Unknown schemes and corrupt bcrypt strings never match. bcrypt is
/// CPU-bound; async callers should run this off the executor.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if BCRYPT_PREFIXES.iter().any(|prefix| stored.starts_with(prefix)) {
        return match bcrypt::verify(password, stored) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(error = %e, "stored bcrypt hash is unusable");
                false
            }
        };
    }

    let mut parts = stored.splitn(3, '$');
    let (Some(BLAKE3_SCHEME), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let actual = digest(salt, password);
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // crypt(3) output for "correct horse", cost 4, same salt, one per prefix
    const BCRYPT_2A: &str = "$2a$04$abcdefghijklmnopqrstuujydOTSfIH/d5oUHpsygqV5X9xJLQc6e";
    const BCRYPT_2B: &str = "$2b$04$abcdefghijklmnopqrstuujydOTSfIH/d5oUHpsygqV5X9xJLQc6e";
    const BCRYPT_2Y: &str = "$2y$04$abcdefghijklmnopqrstuujydOTSfIH/d5oUHpsygqV5X9xJLQc6e";
    // "password" at cost 10, the cost account tooling uses
    const BCRYPT_COST_10: &str = "$2a$10$abcdefghijklmnopqrstuu5Lo0g67CiD3M4RpN1BmBb4Crp5w7dbK";

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("correct horse");
        assert!(stored.starts_with("blake3$"));
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("correct horse!", &stored));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn test_bcrypt_hashes_verify() {
        for stored in [BCRYPT_2A, BCRYPT_2B, BCRYPT_2Y] {
            assert!(verify_password("correct horse", stored), "{stored}");
            assert!(!verify_password("correct horse!", stored), "{stored}");
        }
        assert!(verify_password("password", BCRYPT_COST_10));
        assert!(!verify_password("Password", BCRYPT_COST_10));
    }

    #[test]
    fn test_bcrypt_crate_output_verifies() {
        let stored = bcrypt::hash("s3cret", 4).unwrap();
        assert!(verify_password("s3cret", &stored));
        assert!(!verify_password("s3cre", &stored));
    }

    #[test]
    fn test_unknown_or_corrupt_never_matches() {
        assert!(!verify_password("pw", "$2a$10$abcdefghijklmnopqrstuv"));
        assert!(!verify_password("pw", "$1$salt$md5crypt"));
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "blake3$only-salt"));
    }
}
