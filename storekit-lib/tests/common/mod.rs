//! Shared fixtures for integration tests.

#![allow(dead_code)]

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use storekit_lib::test_utils::{test_config, TEST_ISSUER_ID, TEST_PUBLIC_KEY_PEM};
use storekit_lib::token::{AppStoreClaims, TOKEN_AUDIENCE};
use storekit_lib::{ApiConfig, AppStoreServerApiClient};
use wiremock::MockServer;

pub use storekit_lib::test_utils::{
    TEST_BUNDLE_ID as BUNDLE_ID, TEST_ISSUER_ID as ISSUER_ID, TEST_KEY_ID as KEY_ID,
    TEST_PRIVATE_KEY as PRIVATE_KEY,
};

/// Mount point mirroring the real `/inApps` prefix.
pub const BASE_PATH: &str = "/inApps";

pub fn config_for(server: &MockServer) -> ApiConfig {
    test_config(&format!("{}{}", server.uri(), BASE_PATH))
}

pub fn client_for(server: &MockServer) -> AppStoreServerApiClient {
    AppStoreServerApiClient::new(config_for(server)).unwrap()
}

/// Verify a token against the fixture public key and return its claims.
pub fn verify_token(token: &str) -> AppStoreClaims {
    let key = DecodingKey::from_ec_pem(TEST_PUBLIC_KEY_PEM.as_bytes()).unwrap();

    let mut validation = Validation::new(Algorithm::ES256);
    validation.set_audience(&[TOKEN_AUDIENCE]);
    validation.set_issuer(&[TEST_ISSUER_ID]);
    validation.set_required_spec_claims(&["exp", "iat", "aud", "iss"]);

    jsonwebtoken::decode::<AppStoreClaims>(token, &key, &validation)
        .unwrap()
        .claims
}
