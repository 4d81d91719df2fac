//! CLI command implementations

pub mod history;
pub mod notifications;
pub mod subscriptions;
pub mod token;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use storekit_lib::{ApiConfig, AppStoreServerApiClient, Environment, StoreKitError};

use crate::ui;

/// Load API configuration from a JSON file, or from the environment.
pub fn load_config(config_path: Option<&Path>, production: bool) -> Result<ApiConfig> {
    let config = match config_path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration {}", path.display()))?;
            serde_json::from_str::<ApiConfig>(&contents)
                .context("Failed to parse API configuration")?
        }
        None => ApiConfig::from_env()?.ok_or_else(|| {
            anyhow::anyhow!(
                "No App Store credentials. Pass --config or set APPSTORE_SERVER_API_KEY_ID, \
                 APPSTORE_SERVER_API_ISSUER_ID, APPSTORE_SERVER_API_SUBSCRIPTION_KEY and \
                 APPSTORE_BUNDLE_ID."
            )
        })?,
    };

    Ok(if production {
        config.with_environment(Environment::Production)
    } else {
        config
    })
}

/// Build a client for the loaded configuration.
pub fn build_client(config: ApiConfig, verbose: bool) -> Result<AppStoreServerApiClient> {
    if verbose {
        describe_config(&config, &mut std::io::stderr())?;
    }
    tracing::debug!(?config, "building App Store Server API client");

    Ok(AppStoreServerApiClient::new(config)?)
}

/// Write the effective target of the configuration, kept off stdout.
fn describe_config(config: &ApiConfig, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "  Environment: {}", config.environment)?;
    writeln!(out, "  Base URL: {}", config.base_url())?;
    writeln!(out, "  Bundle ID: {}", config.bundle_id)
}

/// Print a vendor error before handing it back to `main`.
pub fn report(err: StoreKitError) -> anyhow::Error {
    if let Some(api_error) = err.api_error() {
        ui::error(&format!(
            "App Store returned error {}: {}",
            api_error.error_code, api_error.error_message
        ));
        if err.is_retryable() {
            ui::info("This error is transient; try again later.");
        }
    }
    err.into()
}
