//! Property tests for the session token codec.
//!
//!   cargo test --test token_codec_props

mod common;

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use afix_backend::{AuthError, NewClaims, TokenCodec};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use proptest::prelude::*;
use serde_json::{json, Value};
use sha2::Sha256;

const BASE64URL_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn extra_claims() -> impl Strategy<Value = Vec<(String, Value)>> {
    let value = prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[ -~]{0,24}".prop_map(Value::from),
        Just(Value::Null),
    ];
    prop::collection::vec(("[a-z_]{1,10}", value), 0..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(k, _)| !matches!(k.as_str(), "sub" | "iat" | "exp"))
            .collect()
    })
}

fn ttl_strategy() -> impl Strategy<Value = (String, i64)> {
    (0u32..100_000, prop_oneof![Just('s'), Just('m'), Just('h'), Just('d')]).prop_map(
        |(n, unit)| {
            let secs = match unit {
                's' => 1,
                'm' => 60,
                'h' => 3_600,
                _ => 86_400,
            };
            (format!("{n}{unit}"), i64::from(n) * secs)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_preserves_claims(
        sub in "[A-Za-z0-9_-]{1,32}",
        extra in extra_claims(),
        secret in "[ -~]{1,48}",
        (ttl, ttl_secs) in ttl_strategy(),
    ) {
        let codec = TokenCodec::new(&secret).unwrap();
        let now = SystemTime::now();

        let mut claims = NewClaims::new(sub.clone());
        for (k, v) in &extra {
            claims = claims.with(k.clone(), v.clone());
        }

        let token = codec.sign_at(claims, &ttl, now).unwrap();
        let verified = codec.verify_at(&token, now).unwrap();

        // later duplicates win, same as the builder
        let expected: BTreeMap<String, Value> = extra.into_iter().collect();

        prop_assert_eq!(&verified.sub, &sub);
        prop_assert_eq!(verified.extra.len(), expected.len());
        for (k, v) in &expected {
            prop_assert_eq!(verified.get(k), Some(v));
        }
        let iat = verified.iat.unwrap();
        prop_assert_eq!(verified.exp.unwrap() - iat, ttl_secs);
    }

    #[test]
    fn flipping_a_signature_char_is_detected(
        secret in "[ -~]{1,48}",
        index in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let codec = TokenCodec::new(&secret).unwrap();
        let token = codec.sign(NewClaims::new("user-1"), "1h").unwrap();

        let sig_start = token.rfind('.').unwrap() + 1;
        let pos = sig_start + index.index(token.len() - sig_start);
        let original = token.as_bytes()[pos];
        let mut candidate = BASE64URL_CHARS[replacement.index(BASE64URL_CHARS.len())];
        if candidate == original {
            candidate = if original == b'A' { b'B' } else { b'A' };
        }

        let mut tampered = token.into_bytes();
        tampered[pos] = candidate;
        let tampered = String::from_utf8(tampered).unwrap();

        prop_assert_eq!(codec.verify(&tampered), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn other_secrets_are_rejected(
        first in "[ -~]{1,32}",
        second in "[ -~]{1,32}",
    ) {
        prop_assume!(first != second);
        let token = TokenCodec::new(&first)
            .unwrap()
            .sign(NewClaims::new("user-1"), "1d")
            .unwrap();

        prop_assert_eq!(
            TokenCodec::new(&second).unwrap().verify(&token),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn wrong_segment_counts_are_malformed(
        segments in prop::collection::vec("[A-Za-z0-9_-]{0,12}", 1..8),
    ) {
        prop_assume!(segments.len() != 3);
        let codec = TokenCodec::new("secret").unwrap();
        prop_assert_eq!(
            codec.verify(&segments.join(".")),
            Err(AuthError::MalformedToken)
        );
    }
}

#[test]
fn end_to_end_scenario() {
    let codec = TokenCodec::new("topsecret").unwrap();
    let now = SystemTime::now();

    let token = codec
        .sign_at(
            NewClaims::new("user-42").with("email", "a@b.com"),
            "7d",
            now,
        )
        .unwrap();
    let claims = codec.verify_at(&token, now).unwrap();

    let t = now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64;
    assert_eq!(
        serde_json::to_value(&claims).unwrap(),
        json!({"sub": "user-42", "email": "a@b.com", "iat": t, "exp": t + 604_800})
    );
}

#[test]
fn one_second_token_expires_after_clock_advances() {
    let codec = TokenCodec::new("topsecret").unwrap();
    let issued = SystemTime::now();
    let token = codec.sign_at(NewClaims::new("u"), "1s", issued).unwrap();

    assert!(codec.verify_at(&token, issued).is_ok());
    assert_eq!(
        codec.verify_at(&token, issued + Duration::from_secs(2)),
        Err(AuthError::TokenExpired)
    );
}

#[test]
fn banana_ttl_defaults_to_seven_days() {
    let codec = TokenCodec::new("topsecret").unwrap();
    let claims = codec
        .verify(&codec.sign(NewClaims::new("u"), "banana").unwrap())
        .unwrap();
    assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 604_800);
}

/// Sign arbitrary segments with an independent HMAC implementation.
fn forge(secret: &str, header: &[u8], payload: &[u8]) -> String {
    let input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    );
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(input.as_bytes());
    format!("{input}.{}", URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

#[test]
fn correctly_signed_non_json_payload_is_malformed() {
    let codec = TokenCodec::new("topsecret").unwrap();
    let token = forge("topsecret", br#"{"alg":"HS256","typ":"JWT"}"#, b"not json");
    assert_eq!(codec.verify(&token), Err(AuthError::MalformedToken));
}

#[test]
fn independently_signed_token_verifies() {
    let codec = TokenCodec::new("topsecret").unwrap();
    let token = forge(
        "topsecret",
        br#"{"alg":"HS256","typ":"JWT"}"#,
        br#"{"sub":"user-9","exp":4102444800,"role":"admin"}"#,
    );

    let claims = codec.verify(&token).unwrap();
    assert_eq!(claims.sub, "user-9");
    assert_eq!(claims.role(), Some("admin"));
    assert_eq!(claims.iat, None);
}

#[test]
fn swapped_payload_fails_on_signature_first() {
    let codec = TokenCodec::new("topsecret").unwrap();
    let token = codec.sign(NewClaims::new("u"), "1h").unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let swapped = format!("{}.{}.{}", parts[0], "bm90IGpzb24", parts[2]);
    assert_eq!(codec.verify(&swapped), Err(AuthError::InvalidSignature));
}
