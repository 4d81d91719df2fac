//! Configuration for the App Store Server API client.
//!
//! Configuration is always injected into the client. [`ApiConfig::from_env`]
//! is a convenience for binaries; the dispatcher never reads the process
//! environment itself.
//!
//! # Environment Variables
//!
//! - `APPSTORE_SERVER_API_KEY_ID` - private key ID from App Store Connect
//! - `APPSTORE_SERVER_API_ISSUER_ID` - issuer ID from the API Keys page
//! - `APPSTORE_SERVER_API_SUBSCRIPTION_KEY` - base64 PKCS#8 private key
//! - `APPSTORE_BUNDLE_ID` - app bundle identifier
//! - `APPSTORE_ENVIRONMENT` - `Production` selects production, anything else sandbox
//! - `APPSTORE_TIMEOUT_SECS` - request timeout (optional)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::StoreKitError;

/// Production API base URL.
pub const PRODUCTION_BASE_URL: &str = "https://api.storekit.itunes.apple.com/inApps";

/// Sandbox API base URL.
pub const SANDBOX_BASE_URL: &str = "https://api.storekit-sandbox.itunes.apple.com/inApps";

/// App Store server environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live App Store.
    Production,
    /// Sandbox testing environment.
    #[default]
    Sandbox,
}

impl Environment {
    /// Base URL for API calls in this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }

    /// Map a deployment name to an environment.
    ///
    /// Only the exact string `Production` selects production.
    pub fn from_deployment(name: &str) -> Self {
        if name == "Production" {
            Self::Production
        } else {
            Self::Sandbox
        }
    }

    /// Get the environment name as reported by the App Store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "Production",
            Self::Sandbox => "Sandbox",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and transport settings for [`crate::AppStoreServerApiClient`].
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Private key ID from App Store Connect.
    pub key_id: String,

    /// Issuer ID from the API Keys page in App Store Connect.
    pub issuer_id: String,

    /// Private key issued by Apple: base64 of the PKCS#8 DER bytes.
    pub private_key: String,

    /// App bundle identifier, embedded in every token.
    pub bundle_id: String,

    /// Server environment.
    #[serde(default)]
    pub environment: Environment,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Replaces the environment base URL (proxies, test servers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

impl ApiConfig {
    /// Create a sandbox configuration from the four credentials.
    pub fn new(
        key_id: impl Into<String>,
        issuer_id: impl Into<String>,
        private_key: impl Into<String>,
        bundle_id: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            issuer_id: issuer_id.into(),
            private_key: private_key.into(),
            bundle_id: bundle_id.into(),
            environment: Environment::default(),
            timeout_secs: default_timeout(),
            base_url: None,
        }
    }

    /// Set the environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Effective base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` if any of the four credential variables is unset.
    pub fn from_env() -> crate::Result<Option<Self>> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// A timeout that is not a whole number of seconds is an error.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (Some(key_id), Some(issuer_id), Some(private_key), Some(bundle_id)) = (
            lookup("APPSTORE_SERVER_API_KEY_ID"),
            lookup("APPSTORE_SERVER_API_ISSUER_ID"),
            lookup("APPSTORE_SERVER_API_SUBSCRIPTION_KEY"),
            lookup("APPSTORE_BUNDLE_ID"),
        ) else {
            return Ok(None);
        };

        let environment = lookup("APPSTORE_ENVIRONMENT")
            .map(|name| Environment::from_deployment(&name))
            .unwrap_or_default();

        let mut config =
            Self::new(key_id, issuer_id, private_key, bundle_id).with_environment(environment);

        if let Some(raw) = lookup("APPSTORE_TIMEOUT_SECS") {
            let secs = raw.trim().parse().map_err(|_| {
                StoreKitError::invalid_configuration(
                    "timeout_secs",
                    format!("APPSTORE_TIMEOUT_SECS is not a number of seconds: {:?}", raw),
                )
            })?;
            config = config.with_timeout(secs);
        }

        Ok(Some(config))
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("key_id", &self.key_id)
            .field("issuer_id", &self.issuer_id)
            .field("private_key", &"<redacted>")
            .field("bundle_id", &self.bundle_id)
            .field("environment", &self.environment)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(
            Environment::Production.base_url(),
            "https://api.storekit.itunes.apple.com/inApps"
        );
        assert_eq!(
            Environment::Sandbox.base_url(),
            "https://api.storekit-sandbox.itunes.apple.com/inApps"
        );
    }

    #[test]
    fn test_from_deployment() {
        assert_eq!(Environment::from_deployment("Production"), Environment::Production);
        assert_eq!(Environment::from_deployment("production"), Environment::Sandbox);
        assert_eq!(Environment::from_deployment("Development"), Environment::Sandbox);
        assert_eq!(Environment::from_deployment(""), Environment::Sandbox);
    }

    #[test]
    fn test_config_builder() {
        let config = ApiConfig::new("KEY123", "issuer", "c2VjcmV0", "com.example.app")
            .with_environment(Environment::Production)
            .with_timeout(60);

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.base_url(), PRODUCTION_BASE_URL);

        let config = config.with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config: ApiConfig = serde_json::from_value(serde_json::json!({
            "key_id": "KEY123",
            "issuer_id": "issuer",
            "private_key": "c2VjcmV0",
            "bundle_id": "com.example.app"
        }))
        .unwrap();

        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.base_url.is_none());
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const CREDENTIALS: [(&str, &str); 4] = [
        ("APPSTORE_SERVER_API_KEY_ID", "KEY123"),
        ("APPSTORE_SERVER_API_ISSUER_ID", "issuer"),
        ("APPSTORE_SERVER_API_SUBSCRIPTION_KEY", "c2VjcmV0"),
        ("APPSTORE_BUNDLE_ID", "com.example.app"),
    ];

    #[test]
    fn test_from_lookup_reads_variables() {
        let mut env = vars(&CREDENTIALS);
        env.insert("APPSTORE_ENVIRONMENT".into(), "Production".into());
        env.insert("APPSTORE_TIMEOUT_SECS".into(), "12".into());

        let config = ApiConfig::from_lookup(|name| env.get(name).cloned())
            .unwrap()
            .unwrap();

        assert_eq!(config.key_id, "KEY123");
        assert_eq!(config.bundle_id, "com.example.app");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_from_lookup_missing_credential() {
        let mut env = vars(&CREDENTIALS);
        env.remove("APPSTORE_BUNDLE_ID");

        let config = ApiConfig::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let mut env = vars(&CREDENTIALS);
        env.insert("APPSTORE_TIMEOUT_SECS".into(), "thirty".into());

        match ApiConfig::from_lookup(|name| env.get(name).cloned()) {
            Err(StoreKitError::InvalidConfiguration { field, reason }) => {
                assert_eq!(field, "timeout_secs");
                assert!(reason.contains("thirty"));
            }
            other => panic!("expected invalid timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = ApiConfig::new("KEY123", "issuer", "c2VjcmV0", "com.example.app");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("c2VjcmV0"));
        assert!(debug.contains("<redacted>"));
    }
}
