//! Token command - sign and inspect an API bearer token

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use storekit_lib::token::{sign_token, AppStoreClaims};
use storekit_lib::ApiConfig;

use crate::ui;

pub fn run(config: &ApiConfig, raw: bool) -> Result<()> {
    let token = sign_token(
        &config.key_id,
        &config.issuer_id,
        &config.private_key,
        &config.bundle_id,
    )
    .map_err(super::report)?;

    if raw {
        println!("{}", token);
        return Ok(());
    }

    ui::header("App Store Server API Token");

    let header = jsonwebtoken::decode_header(&token)?;
    let claims = inspect_claims(&token)?;

    ui::key_value("Algorithm", &format!("{:?}", header.alg));
    ui::key_value("Key ID", header.kid.as_deref().unwrap_or("-"));
    ui::key_value("Issuer", &claims.iss);
    ui::key_value("Audience", &claims.aud);
    ui::key_value("Bundle ID", &claims.bid);
    ui::key_value("Expires", &format_timestamp(claims.exp));
    ui::separator();
    println!("{}", token);

    Ok(())
}

/// Read the claims of a token we just signed, without verifying it.
fn inspect_claims(token: &str) -> Result<AppStoreClaims> {
    let mut validation = Validation::new(Algorithm::ES256);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<AppStoreClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
