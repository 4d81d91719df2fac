//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use storekit_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Client: `AppStoreServerApiClient`, `AppStoreServerApi`
//! - Configuration: `ApiConfig`, `Environment`
//! - Error types: `StoreKitError`, `StoreKitErrorCode`, `Result`
//! - Request/response models

// Client
pub use crate::client::{AppStoreServerApi, AppStoreServerApiClient};

// Configuration
pub use crate::config::{ApiConfig, Environment};

// Error handling
pub use crate::errors::{StoreKitError, StoreKitErrorCode};
pub use crate::Result;

// Models
pub use crate::models::{
    ErrorResponse, NotificationHistoryRequest, NotificationHistoryResponse, SubscriptionStatus,
    SubscriptionStatusResponse, TransactionHistoryResponse,
};

// Token signing
pub use crate::token::sign_token;
