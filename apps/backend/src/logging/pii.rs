use std::fmt;

use lazy_regex::regex;
use regex::Captures;

/// Mask emails and token-like runs before they reach the logs.
///
/// - `ana@example.com` → `a***@example.com`
/// - base64url/hex runs of 16+ characters (session tokens, hashes) →
///   `[REDACTED_TOKEN]`
pub fn redact(input: &str) -> String {
    let emails = regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]+\b")
        .replace_all(input, |caps: &Captures| {
            let found = &caps[0];
            match found.split_once('@') {
                Some((local, domain)) if !local.is_empty() => {
                    let first: String = local.chars().take(1).collect();
                    format!("{first}***@{domain}")
                }
                _ => found.to_string(),
            }
        });

    regex!(r"[A-Za-z0-9_\-]{16,}(\.[A-Za-z0-9_\-]{16,}){0,2}")
        .replace_all(&emails, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Displays its contents through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
