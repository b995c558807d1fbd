//! Integration tests for key and signature encodings

use lattice_dsa::error::error_codes;
use lattice_dsa::prelude::*;
use lattice_dsa::{decode, encode};

#[test]
fn test_encoded_lengths() {
    let expected = [
        (SecurityLevel::Level2, 1312, 2544, 2420),
        (SecurityLevel::Level3, 1952, 4016, 3293),
        (SecurityLevel::Level5, 2592, 4880, 4595),
    ];
    for (level, pk_len, sk_len, sig_len) in expected {
        let (sk, pk) = generate_key_pair(level, Some(&b"lengths"[..])).unwrap();
        let signature = sign(b"lengths", &sk).unwrap();
        assert_eq!(encode(&pk).len(), pk_len);
        assert_eq!(encode(&sk).len(), sk_len);
        assert_eq!(encode(&signature).len(), sig_len);
    }
}

#[test]
fn test_round_trips_preserve_keys_and_matrix() {
    for level in SecurityLevel::all() {
        let (sk, pk) = generate_key_pair(level, Some(&b"roundtrip"[..])).unwrap();

        let sk2: PrivateKey = decode(&encode(&sk), level).unwrap();
        let pk2: PublicKey = decode(&encode(&pk), level).unwrap();
        assert_eq!(sk2, sk);
        assert_eq!(pk2, pk);
        assert_eq!(sk2.matrix(), sk.matrix());
        assert_eq!(pk2.matrix(), sk.matrix());
        assert_eq!(sk2.s1(), sk.s1());
        assert_eq!(sk2.t0(), sk.t0());

        // A parsed private key signs exactly like the original
        let message = b"signed after a round trip";
        let a = sign(message, &sk).unwrap();
        let b = sign(message, &sk2).unwrap();
        assert_eq!(a, b);

        let sig2: Signature = decode(&encode(&a), level).unwrap();
        assert_eq!(sig2, a);
        assert!(verify(message, &sig2, &pk2));
    }
}

#[test]
fn test_wrong_lengths_are_decode_errors() {
    let level = SecurityLevel::Level2;
    let (sk, pk) = generate_key_pair(level, Some(&b"lengths"[..])).unwrap();
    let signature = sign(b"m", &sk).unwrap();

    let mut long_pk = encode(&pk);
    long_pk.push(0);
    let err = PublicKey::from_bytes(&long_pk, level).unwrap_err();
    assert_eq!(err.error_type(), "DecodeError");
    assert_eq!(err.error_code(), error_codes::INVALID_KEY_SIZE);

    let short_sk = &encode(&sk)[..100];
    let err = PrivateKey::from_bytes(short_sk, level).unwrap_err();
    assert_eq!(err.error_code(), error_codes::INVALID_KEY_SIZE);

    let sig_bytes = encode(&signature);
    let err = Signature::from_bytes(&sig_bytes[..sig_bytes.len() - 1], level).unwrap_err();
    assert_eq!(err.error_code(), error_codes::INVALID_SIGNATURE_SIZE);
    assert!(!verify_bytes(b"m", &sig_bytes[..sig_bytes.len() - 1], &pk));
    assert!(!verify_bytes(b"m", &[], &pk));
}

#[test]
fn test_non_canonical_hint_is_rejected() {
    let level = SecurityLevel::Level2;
    let params = level.parameters();
    let (sk, pk) = generate_key_pair(level, Some(&b"hint"[..])).unwrap();
    let message = b"hint encoding";
    let signature = sign(message, &sk).unwrap();
    let bytes = encode(&signature);
    let hint_start = 32 + params.l * params.poly_z_packed_bytes();
    let weight = signature.hint().weight();
    assert!(weight < params.omega);

    // Nonzero padding after the last index
    let mut padded = bytes.clone();
    padded[hint_start + params.omega - 1] = 1;
    assert!(Signature::from_bytes(&padded, level).is_err());
    assert!(!verify_bytes(message, &padded, &pk));

    // End marker past omega
    let mut overflow = bytes.clone();
    overflow[hint_start + params.omega + params.k - 1] = (params.omega + 1) as u8;
    assert!(Signature::from_bytes(&overflow, level).is_err());
    assert!(!verify_bytes(message, &overflow, &pk));

    // Decreasing end markers
    let mut decreasing = bytes.clone();
    decreasing[hint_start + params.omega] = (weight + 1) as u8;
    decreasing[hint_start + params.omega + 1] = 0;
    assert!(Signature::from_bytes(&decreasing, level).is_err());

    // The untouched signature still parses and verifies
    assert!(verify_bytes(message, &bytes, &pk));
}

#[test]
fn test_text_encodings() {
    let (sk, pk) = generate_key_pair(SecurityLevel::Level3, Some(&b"text"[..])).unwrap();
    let signature = sign(b"text", &sk).unwrap();

    let pk_hex = pk.to_hex();
    assert!(pk_hex.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(PublicKey::from_hex(&pk_hex, SecurityLevel::Level3).unwrap(), pk);

    let sk_b64 = sk.to_base64();
    assert_eq!(PrivateKey::from_base64(&sk_b64, SecurityLevel::Level3).unwrap(), sk);

    let sig_b64 = signature.to_base64();
    let parsed = Signature::from_base64(&sig_b64, SecurityLevel::Level3).unwrap();
    assert!(verify(b"text", &parsed, &pk));

    let err = Signature::from_hex("not hex", SecurityLevel::Level3).unwrap_err();
    assert_eq!(err.error_code(), error_codes::INVALID_ENCODING);
}

#[test]
fn test_key_pair_container() {
    let key_pair = KeyPair::generate(SecurityLevel::Level2, Some(&b"container"[..])).unwrap();
    let bytes = key_pair.to_bytes().unwrap();
    let restored = KeyPair::from_bytes(&bytes).unwrap();

    assert_eq!(restored, key_pair);
    assert_eq!(restored.level(), SecurityLevel::Level2);

    let err = KeyPair::from_bytes(&bytes[..10]).unwrap_err();
    assert_eq!(err.error_type(), "SerializationError");
}

#[test]
fn test_fingerprint_is_stable() {
    let (_, a) = generate_key_pair(SecurityLevel::Level2, Some(&b"fp"[..])).unwrap();
    let b: PublicKey = decode(&encode(&a), SecurityLevel::Level2).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint().len(), 16);

    let (_, c) = generate_key_pair(SecurityLevel::Level2, Some(&b"fp2"[..])).unwrap();
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn test_signing_policy_from_json() {
    let policy: SigningPolicy = serde_json::from_str(r#"{"max_attempts": 250}"#).unwrap();
    assert_eq!(policy.max_attempts, 250);

    let (sk, pk) = generate_key_pair(SecurityLevel::Level5, Some(&b"json"[..])).unwrap();
    let signature = sign_with_policy(b"configured", &sk, &policy).unwrap();
    assert!(verify(b"configured", &signature, &pk));

    let zero: SigningPolicy = serde_json::from_str(r#"{"max_attempts": 0}"#).unwrap();
    assert!(sign_with_policy(b"configured", &sk, &zero).is_err());
}
