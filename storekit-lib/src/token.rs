//! ES256 bearer tokens for the App Store Server API.
//!
//! A token is signed with the App Store Connect private key and is valid for
//! one hour. The client signs a fresh token for every request.
//!
//! # Example
//!
//! ```rust,ignore
//! use storekit_lib::token::sign_token;
//!
//! let token = sign_token("2X9R4HXF34", "57246542-96fe-1a63-e053-0824d011072a", &key_b64, "com.example.app")?;
//! ```

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{Result, StoreKitError};

/// Audience expected by the App Store Server API.
pub const TOKEN_AUDIENCE: &str = "appstoreconnect-v1";

/// Token validity in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Claims carried by an App Store Server API token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppStoreClaims {
    /// Issuer ID.
    pub iss: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp), one hour after `iat`.
    pub exp: i64,
    /// Always [`TOKEN_AUDIENCE`].
    pub aud: String,
    /// App bundle identifier.
    pub bid: String,
}

impl AppStoreClaims {
    /// Claims issued now and expiring after [`TOKEN_LIFETIME_SECS`].
    pub fn new(issuer_id: &str, bundle_id: &str) -> Self {
        Self::issued_at(issuer_id, bundle_id, Utc::now().timestamp())
    }

    /// Claims issued at the given Unix timestamp.
    pub fn issued_at(issuer_id: &str, bundle_id: &str, iat: i64) -> Self {
        Self {
            iss: issuer_id.to_owned(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
            aud: TOKEN_AUDIENCE.to_owned(),
            bid: bundle_id.to_owned(),
        }
    }
}

/// Returns a signed JWT for calling the App Store Server API.
///
/// # Arguments
///
/// * `key_id` - private key ID from App Store Connect, placed in the `kid` header
/// * `issuer_id` - issuer ID from the API Keys page in App Store Connect
/// * `private_key` - the key generated by Apple: base64 of its PKCS#8 DER bytes
/// * `bundle_id` - app bundle identifier; embedded as given, not validated
///
/// # Errors
///
/// [`StoreKitError::InvalidConfiguration`] naming the field when `key_id`,
/// `issuer_id` or `private_key` is empty, or when `private_key` is not
/// base64. [`StoreKitError::KeyImport`] when the decoded bytes are not a
/// P-256 private key.
pub fn sign_token(key_id: &str, issuer_id: &str, private_key: &str, bundle_id: &str) -> Result<String> {
    if key_id.is_empty() {
        return Err(StoreKitError::invalid_configuration(
            "key_id",
            "AppStoreServerApiKeyId was not provided",
        ));
    }
    if issuer_id.is_empty() {
        return Err(StoreKitError::invalid_configuration(
            "issuer_id",
            "AppStoreServerApiIssuerId was not provided",
        ));
    }
    if private_key.is_empty() {
        return Err(StoreKitError::invalid_configuration(
            "private_key",
            "AppStoreServerApiSubscriptionKey was not provided",
        ));
    }

    let der = decode_private_key(private_key)?;
    let encoding_key = EncodingKey::from_ec_der(&der);

    let mut header = Header::new(Algorithm::ES256);
    header.kid = Some(key_id.to_owned());
    header.typ = Some("JWT".to_owned());

    let claims = AppStoreClaims::new(issuer_id, bundle_id);

    jsonwebtoken::encode(&header, &claims, &encoding_key).map_err(|e| match e.kind() {
        ErrorKind::InvalidEcdsaKey | ErrorKind::InvalidKeyFormat => {
            StoreKitError::KeyImport(e.to_string())
        }
        _ => StoreKitError::Signing(e.to_string()),
    })
}

/// Decode the base64 key, tolerating line breaks copied from a `.p8` file.
fn decode_private_key(private_key: &str) -> Result<Vec<u8>> {
    let compact: String = private_key
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    BASE64.decode(compact.as_bytes()).map_err(|e| {
        StoreKitError::invalid_configuration(
            "private_key",
            format!("AppStoreServerApiSubscriptionKey is not a valid Base64 string: {}", e),
        )
    })
}
