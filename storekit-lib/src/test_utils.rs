//! Signing fixtures for tests.
//!
//! Available in test builds and behind the `test-utils` feature so host
//! applications can exercise their own App Store integrations offline.

use crate::config::ApiConfig;

/// Base64 PKCS#8 DER of a throwaway P-256 private key.
pub const TEST_PRIVATE_KEY: &str = "MIGHAgEAMBMGByqGSM49AgEGCCqGSM49AwEHBG0wawIBAQQgJEGUMT1OGu2SWAyWV3LUu9XkCCHNJrlm43W5ZB+wpn6hRANCAARlOp0GMCEflu1ylVF3LpuU7Iib/hb5tscreC29opbsRCX+ygZm5fnlxsnNdtN0lN082oXKg+Yhfc2lQ9sm0Pta";

/// Public half of [`TEST_PRIVATE_KEY`], for verifying signed tokens.
pub const TEST_PUBLIC_KEY_PEM: &str = "-----BEGIN PUBLIC KEY-----
MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEZTqdBjAhH5btcpVRdy6blOyIm/4W
+bbHK3gtvaKW7EQl/soGZuX55cbJzXbTdJTdPNqFyoPmIX3NpUPbJtD7Wg==
-----END PUBLIC KEY-----
";

/// Key ID sent in the token header.
pub const TEST_KEY_ID: &str = "2X9R4HXF34";
/// Issuer ID sent as `iss`.
pub const TEST_ISSUER_ID: &str = "57246542-96fe-1a63-e053-0824d011072a";
/// Bundle ID sent as `bid`.
pub const TEST_BUNDLE_ID: &str = "com.example.app";

/// Sandbox configuration signed with the test key and pointed at `base_url`.
pub fn test_config(base_url: &str) -> ApiConfig {
    ApiConfig::new(TEST_KEY_ID, TEST_ISSUER_ID, TEST_PRIVATE_KEY, TEST_BUNDLE_ID)
        .with_base_url(base_url)
}
