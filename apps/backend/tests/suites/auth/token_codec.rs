use backend::auth::claims::Claims;
use backend::auth::errors::DecodeError;
use backend::auth::jwt::TokenCodec;
use backend::auth::TOKEN_TTL_SECS;
use backend::state::security_config::SecurityConfig;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use proptest::prelude::*;
use time::{Duration, OffsetDateTime};

use crate::common::proptest_prelude::proptest_prelude_config;

fn codec(secret: &str) -> TokenCodec {
    TokenCodec::new(&SecurityConfig::new(secret.as_bytes()))
}

fn at(unix: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(unix).expect("timestamp in range")
}

/// Flip one bit of the character at `offset` within the signature text.
fn flip_signature_char(token: &str, offset: usize, bit: u8) -> String {
    let sig_start = token.rfind('.').expect("three segments") + 1;
    let mut bytes = token.as_bytes().to_vec();
    let index = sig_start + offset % (bytes.len() - sig_start);
    bytes[index] ^= 1 << bit;
    String::from_utf8(bytes).expect("ascii stays ascii below bit 7")
}

/// Flip one bit of the decoded segment at `index` and re-encode it.
fn flip_bit(token: &str, index: usize, bit: usize) -> String {
    let mut segments: Vec<String> = token.split('.').map(str::to_string).collect();
    let mut bytes = URL_SAFE_NO_PAD
        .decode(&segments[index])
        .expect("segment is base64url");
    let position = bit % (bytes.len() * 8);
    bytes[position / 8] ^= 1 << (position % 8);
    segments[index] = URL_SAFE_NO_PAD.encode(bytes);
    segments.join(".")
}

#[test]
fn alice_scenario_with_secret_s1() {
    let codec = codec("s1");
    let t0 = at(1_700_000_000);
    let claims = Claims::new("42", "alice", t0).unwrap();
    let token = codec.encode(&claims).unwrap();

    let decoded = codec.decode_at(&token, t0 + Duration::hours(1)).unwrap();
    assert_eq!(decoded.user_id(), "42");
    assert_eq!(decoded.user_name(), "alice");
    assert_eq!(decoded, claims);

    assert_eq!(
        codec.decode_at(&token, t0 + Duration::hours(12) + Duration::seconds(1)),
        Err(DecodeError::Expired)
    );
}

#[test]
fn secrets_are_not_interchangeable() {
    let t0 = at(1_700_000_000);
    let token = codec("s1")
        .encode(&Claims::new("42", "alice", t0).unwrap())
        .unwrap();

    assert_eq!(
        codec("s2").decode_at(&token, t0),
        Err(DecodeError::InvalidSignature)
    );
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn encoded_claims_come_back_unchanged(
        user_id in 1i64..i64::MAX,
        user_name in "[a-zA-Z0-9_.\\- ]{0,24}",
        issued in 0i64..4_000_000_000,
        elapsed in 0i64..TOKEN_TTL_SECS,
    ) {
        let codec = codec("prop-secret");
        let claims = Claims::new(user_id.to_string(), user_name, at(issued)).unwrap();
        let token = codec.encode(&claims).unwrap();

        let decoded = codec.decode_at(&token, at(issued + elapsed)).unwrap();
        prop_assert_eq!(decoded.expires_at() - decoded.issued_at(), TOKEN_TTL_SECS);
        prop_assert_eq!(decoded, claims);
    }

    #[test]
    fn signature_bit_flips_never_verify(bit in 0usize..256) {
        let codec = codec("prop-secret");
        let now = at(1_700_000_000);
        let token = codec.encode(&Claims::new("42", "alice", now).unwrap()).unwrap();

        let tampered = flip_bit(&token, 2, bit);
        prop_assert_eq!(codec.decode_at(&tampered, now), Err(DecodeError::InvalidSignature));
    }

    #[test]
    fn signature_text_bit_flips_are_invalid_signature(
        user_id in 1i64..1_000_000,
        offset in 0usize..64,
        bit in 0u8..7,
    ) {
        let codec = codec("prop-secret");
        let now = at(1_700_000_000);
        let token = codec
            .encode(&Claims::new(user_id.to_string(), "alice", now).unwrap())
            .unwrap();

        let tampered = flip_signature_char(&token, offset, bit);
        prop_assert_eq!(codec.decode_at(&tampered, now), Err(DecodeError::InvalidSignature));
    }

    #[test]
    fn payload_bit_flips_never_verify(bit in 0usize..2048) {
        let codec = codec("prop-secret");
        let now = at(1_700_000_000);
        let token = codec.encode(&Claims::new("42", "alice", now).unwrap()).unwrap();

        let tampered = flip_bit(&token, 1, bit);
        prop_assert!(codec.decode_at(&tampered, now).is_err());
    }

    #[test]
    fn expiry_is_exact(issued in 0i64..4_000_000_000) {
        let codec = codec("prop-secret");
        let token = codec.encode(&Claims::new("1", "edge", at(issued)).unwrap()).unwrap();

        prop_assert!(codec.decode_at(&token, at(issued + TOKEN_TTL_SECS - 1)).is_ok());
        prop_assert_eq!(
            codec.decode_at(&token, at(issued + TOKEN_TTL_SECS)),
            Err(DecodeError::Expired)
        );
    }
}

#[test]
fn dot_injected_into_signature_is_invalid_signature() {
    let codec = codec("s1");
    let now = at(1_700_000_000);
    let token = codec.encode(&Claims::new("42", "alice", now).unwrap()).unwrap();
    let sig_start = token.rfind('.').unwrap() + 1;

    // 'n' (0x6e) with bit 6 flipped is '.' (0x2e).
    let mut tampered = token.clone();
    tampered.replace_range(sig_start + 5..sig_start + 6, ".");
    assert_eq!(tampered.split('.').count(), 4);
    assert_eq!(
        codec.decode_at(&tampered, now),
        Err(DecodeError::InvalidSignature)
    );
}
