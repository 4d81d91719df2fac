//! App Store Server API client.
//!
//! Every call signs a fresh bearer token, issues one HTTP request and maps
//! the response to a typed result. There is no token cache and no retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use storekit_lib::{ApiConfig, AppStoreServerApiClient, Environment};
//!
//! let config = ApiConfig::new(key_id, issuer_id, private_key, "com.example.app")
//!     .with_environment(Environment::Production);
//! let client = AppStoreServerApiClient::new(config)?;
//!
//! if let Some(statuses) = client.get_all_subscription_statuses("2000000123456789").await? {
//!     for item in statuses.last_transactions() {
//!         println!("{}: {:?}", item.original_transaction_id, item.status);
//!     }
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::models::{
    ErrorResponse, NotificationHistoryRequest, NotificationHistoryResponse,
    SubscriptionStatusResponse, TransactionHistoryResponse,
};
use crate::token::sign_token;
use crate::{Result, StoreKitError};

/// Operations offered by the App Store Server API.
///
/// Implemented by [`AppStoreServerApiClient`]; host applications can supply
/// their own implementation in tests.
#[async_trait]
pub trait AppStoreServerApi: Send + Sync {
    /// Get the statuses for all of a customer's auto-renewable subscriptions.
    async fn get_all_subscription_statuses(
        &self,
        transaction_id: &str,
    ) -> Result<Option<SubscriptionStatusResponse>>;

    /// Get notifications the App Store attempted to send to your server.
    async fn get_notification_history(
        &self,
        request: &NotificationHistoryRequest,
        pagination_token: &str,
    ) -> Result<Option<NotificationHistoryResponse>>;

    /// Get a customer's in-app purchase transaction history.
    async fn get_transaction_history(
        &self,
        transaction_id: &str,
        revision: &str,
    ) -> Result<Option<TransactionHistoryResponse>>;
}

/// HTTP client for the App Store Server API.
pub struct AppStoreServerApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl AppStoreServerApiClient {
    /// Create a new client with the given configuration.
    ///
    /// Credentials are not validated here; they are checked on every call
    /// when the token is signed. A zero timeout is rejected.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(StoreKitError::invalid_configuration(
                "timeout_secs",
                "must be greater than zero",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreKitError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build the full URL for an endpoint.
    ///
    /// Query pairs keep insertion order. A repeated key keeps its first
    /// position and takes the last value.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| StoreKitError::invalid_configuration("base_url", e.to_string()))?;

        let pairs = merge_query(query);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    /// Make an authenticated GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        self.request(path, Method::GET, query, Option::<&()>::None)
            .await
    }

    /// Make an authenticated POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Option<T>> {
        self.request(path, Method::POST, query, Some(body)).await
    }

    /// Call the App Store Server API.
    ///
    /// # Arguments
    ///
    /// * `path` - endpoint relative to the environment base URL
    /// * `method` - `GET` or `POST`; anything else fails before signing
    /// * `query` - query parameters appended to the URL
    /// * `body` - JSON body, sent with `POST` only
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the server answers success with an empty body.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, query, body)))]
    pub async fn request<T, B>(
        &self,
        path: &str,
        method: Method,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        if method != Method::GET && method != Method::POST {
            return Err(StoreKitError::UnsupportedMethod(method));
        }

        let token = sign_token(
            &self.config.key_id,
            &self.config.issuer_id,
            &self.config.private_key,
            &self.config.bundle_id,
        )?;
        let url = self.url(path, query)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%url, "dispatching App Store Server API request");

        let mut request = self.client.request(method.clone(), url).bearer_auth(token);
        if method == Method::POST {
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        let response = request.send().await?;
        self.handle_response(path, response).await
    }

    /// Map a response to a typed body or an error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<Option<T>> {
        #[cfg(feature = "tracing")]
        tracing::debug!(status = response.status().as_u16(), path, "received response");

        if let Some(status_error) = response.error_for_status_ref().err() {
            let body = response.bytes().await.unwrap_or_default();

            return match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(error) => Err(StoreKitError::Api {
                    path: path.to_owned(),
                    error,
                }),
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(path, "error response is not a vendor error payload");
                    Err(StoreKitError::Http(status_error))
                }
            };
        }

        let body = response.bytes().await?;
        parse_body(&body)
    }

    /// Get the statuses for all of a customer's auto-renewable subscriptions.
    ///
    /// `transaction_id` may be any transaction of the customer, including an
    /// original transaction identifier.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub async fn get_all_subscription_statuses(
        &self,
        transaction_id: &str,
    ) -> Result<Option<SubscriptionStatusResponse>> {
        let path = format!("v1/subscriptions/{}", transaction_id);
        self.get(&path, &[]).await
    }

    /// Get one page of notifications the App Store attempted to send.
    ///
    /// An empty `pagination_token` requests the first page.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, request)))]
    pub async fn get_notification_history(
        &self,
        request: &NotificationHistoryRequest,
        pagination_token: &str,
    ) -> Result<Option<NotificationHistoryResponse>> {
        let mut query = Vec::new();
        if !pagination_token.is_empty() {
            query.push(("paginationToken", pagination_token));
        }

        self.post("v1/notifications/history", &query, request).await
    }

    /// Get one page of a customer's transaction history.
    ///
    /// An empty `revision` requests the first page.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub async fn get_transaction_history(
        &self,
        transaction_id: &str,
        revision: &str,
    ) -> Result<Option<TransactionHistoryResponse>> {
        let mut query = Vec::new();
        if !revision.is_empty() {
            query.push(("revision", revision));
        }

        let path = format!("v2/history/{}", transaction_id);
        self.get(&path, &query).await
    }
}

#[async_trait]
impl AppStoreServerApi for AppStoreServerApiClient {
    async fn get_all_subscription_statuses(
        &self,
        transaction_id: &str,
    ) -> Result<Option<SubscriptionStatusResponse>> {
        AppStoreServerApiClient::get_all_subscription_statuses(self, transaction_id).await
    }

    async fn get_notification_history(
        &self,
        request: &NotificationHistoryRequest,
        pagination_token: &str,
    ) -> Result<Option<NotificationHistoryResponse>> {
        AppStoreServerApiClient::get_notification_history(self, request, pagination_token).await
    }

    async fn get_transaction_history(
        &self,
        transaction_id: &str,
        revision: &str,
    ) -> Result<Option<TransactionHistoryResponse>> {
        AppStoreServerApiClient::get_transaction_history(self, transaction_id, revision).await
    }
}

/// Collapse repeated keys, last value wins, first position kept.
fn merge_query<'a>(query: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    let mut merged: Vec<(&str, &str)> = Vec::with_capacity(query.len());
    for &(key, value) in query {
        match merged.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => merged.push((key, value)),
        }
    }
    merged
}

/// Empty bodies and JSON `null` are absent results.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(body)?)
}
