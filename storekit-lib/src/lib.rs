//! App Store Server API client library.
//!
//! This crate signs short-lived ES256 tokens with an App Store Connect key
//! and calls the App Store Server API on behalf of a server application.
//! It intentionally stays stateless: configuration is injected, every call
//! signs its own token, and failures are returned to the caller untouched.
//!
//! # Features
//!
//! - **Token signing**: [`token::sign_token`] builds the bearer token
//! - **Subscription status**: all statuses for a customer's subscriptions
//! - **Transaction history**: paginated by revision token
//! - **Notification history**: paginated by pagination token
//! - **Typed errors**: vendor error payloads surface as [`StoreKitError::Api`]
//!
//! # Example
//!
//! ```ignore
//! use storekit_lib::{ApiConfig, AppStoreServerApiClient};
//!
//! let config = ApiConfig::from_env()?.expect("App Store credentials");
//! let client = AppStoreServerApiClient::new(config)?;
//!
//! let mut revision = String::new();
//! loop {
//!     let Some(page) = client.get_transaction_history("2000000123456789", &revision).await? else {
//!         break;
//!     };
//!     println!("{} transactions", page.signed_transactions.len());
//!     match page.next_revision() {
//!         Some(next) => revision = next.to_string(),
//!         None => break,
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod prelude;
pub mod token;

/// Signing fixtures for tests.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{AppStoreServerApi, AppStoreServerApiClient};
pub use config::{ApiConfig, Environment};
pub use errors::{StoreKitError, StoreKitErrorCode};

/// Common result alias for App Store Server API operations.
pub type Result<T> = std::result::Result<T, StoreKitError>;
