//! Signature and claim checks for signed App Store Server API tokens.

mod common;

use chrono::Utc;
use common::{verify_token, BUNDLE_ID, ISSUER_ID, KEY_ID, PRIVATE_KEY};
use jsonwebtoken::Algorithm;
use storekit_lib::token::{sign_token, TOKEN_AUDIENCE, TOKEN_LIFETIME_SECS};
use storekit_lib::{StoreKitError, StoreKitErrorCode};

/// Allowed clock skew between signing and asserting.
const SKEW_SECS: i64 = 5;

#[test]
fn test_token_claims_verify() {
    let before = Utc::now().timestamp();
    let token = sign_token(KEY_ID, ISSUER_ID, PRIVATE_KEY, BUNDLE_ID).unwrap();
    let after = Utc::now().timestamp();

    let claims = verify_token(&token);

    assert_eq!(claims.iss, ISSUER_ID);
    assert_eq!(claims.aud, TOKEN_AUDIENCE);
    assert_eq!(claims.bid, BUNDLE_ID);
    assert!(claims.iat >= before - SKEW_SECS && claims.iat <= after + SKEW_SECS);
    assert_eq!(claims.exp, claims.iat + TOKEN_LIFETIME_SECS);
}

#[test]
fn test_token_header() {
    let token = sign_token(KEY_ID, ISSUER_ID, PRIVATE_KEY, BUNDLE_ID).unwrap();
    let header = jsonwebtoken::decode_header(&token).unwrap();

    assert_eq!(header.alg, Algorithm::ES256);
    assert_eq!(header.kid.as_deref(), Some(KEY_ID));
}

#[test]
fn test_empty_bundle_id_is_embedded() {
    let token = sign_token(KEY_ID, ISSUER_ID, PRIVATE_KEY, "").unwrap();
    let claims = verify_token(&token);

    assert_eq!(claims.bid, "");
}

#[test]
fn test_each_call_signs_new_token() {
    // ECDSA signatures are randomized, so identical claims still differ.
    let first = sign_token(KEY_ID, ISSUER_ID, PRIVATE_KEY, BUNDLE_ID).unwrap();
    let second = sign_token(KEY_ID, ISSUER_ID, PRIVATE_KEY, BUNDLE_ID).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_configuration_errors_name_field() {
    let cases = [
        (("", ISSUER_ID, PRIVATE_KEY), "key_id"),
        ((KEY_ID, "", PRIVATE_KEY), "issuer_id"),
        ((KEY_ID, ISSUER_ID, ""), "private_key"),
        ((KEY_ID, ISSUER_ID, "%%%"), "private_key"),
    ];

    for ((key_id, issuer_id, private_key), expected) in cases {
        let err = sign_token(key_id, issuer_id, private_key, BUNDLE_ID).unwrap_err();
        match err {
            StoreKitError::InvalidConfiguration { field, .. } => assert_eq!(field, expected),
            other => panic!("expected invalid configuration for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_truncated_key_fails_import() {
    let truncated = &PRIVATE_KEY[..64];
    let err = sign_token(KEY_ID, ISSUER_ID, truncated, BUNDLE_ID).unwrap_err();

    assert_eq!(err.code(), StoreKitErrorCode::KeyImport);
}
