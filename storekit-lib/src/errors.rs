//! Error types for App Store Server API operations.
//!
//! Every failure is a terminal outcome of the call that produced it. The
//! client never retries; [`StoreKitError::is_retryable`] only tells callers
//! which failures are worth retrying on their side.

use reqwest::Method;

use crate::models::ErrorResponse;

/// Error codes for logging and FFI-style integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum StoreKitErrorCode {
    /// A credential or setting is missing or malformed
    InvalidConfiguration = 1000,
    /// The private key could not be imported for ES256
    KeyImport = 1001,
    /// Token signing failed
    Signing = 1002,
    /// HTTP method other than GET or POST
    UnsupportedMethod = 2000,
    /// Structured error returned by the App Store
    Api = 3000,
    /// Transport or unrecognized HTTP failure
    Http = 4000,
    /// Response body did not match the expected shape
    Serialization = 5000,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Comprehensive error type for App Store Server API calls.
#[derive(Debug, thiserror::Error)]
pub enum StoreKitError {
    /// A required credential is missing or malformed.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfiguration {
        /// Offending configuration field
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The decoded key bytes are not a P-256 PKCS#8 private key.
    #[error("failed to import private key: {0}")]
    KeyImport(String),

    /// Token signing failed after the key was accepted.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Only GET and POST are dispatched.
    #[error("method {0} not supported")]
    UnsupportedMethod(Method),

    /// The App Store answered with a structured error body.
    #[error(
        "error when calling App Store Server API for endpoint {path}. \
         Received error code: {}, Received error message: {}",
        .error.error_code,
        .error.error_message
    )]
    Api {
        /// Endpoint path relative to the base URL
        path: String,
        /// Vendor error payload
        error: ErrorResponse,
    },

    /// Transport failure, or a non-success status whose body was not a
    /// vendor error. The original error is kept as-is.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Success body could not be deserialized into the expected type.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal/unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreKitError {
    /// Get the error code for this error.
    pub fn code(&self) -> StoreKitErrorCode {
        match self {
            Self::InvalidConfiguration { .. } => StoreKitErrorCode::InvalidConfiguration,
            Self::KeyImport(_) => StoreKitErrorCode::KeyImport,
            Self::Signing(_) => StoreKitErrorCode::Signing,
            Self::UnsupportedMethod(_) => StoreKitErrorCode::UnsupportedMethod,
            Self::Api { .. } => StoreKitErrorCode::Api,
            Self::Http(_) => StoreKitErrorCode::Http,
            Self::Serialization(_) => StoreKitErrorCode::Serialization,
            Self::Internal(_) => StoreKitErrorCode::Internal,
        }
    }

    /// Returns true if a caller could reasonably retry the same call.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::Api { error, .. } => error.is_rate_limited() || error.is_server_error(),
            _ => false,
        }
    }

    /// The vendor error payload, if this is an API error.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for StoreKitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: i64) -> StoreKitError {
        StoreKitError::Api {
            path: "v1/subscriptions/bad-id".to_string(),
            error: ErrorResponse {
                error_code: code,
                error_message: "Transaction id not found".to_string(),
            },
        }
    }

    #[test]
    fn test_error_codes() {
        let err = StoreKitError::invalid_configuration("key_id", "must not be empty");
        assert_eq!(err.code(), StoreKitErrorCode::InvalidConfiguration);
        assert!(!err.is_retryable());

        let err = StoreKitError::UnsupportedMethod(Method::PUT);
        assert_eq!(err.code(), StoreKitErrorCode::UnsupportedMethod);
    }

    #[test]
    fn test_api_error_display() {
        let err = api_error(4040010);
        let message = err.to_string();
        assert!(message.contains("v1/subscriptions/bad-id"));
        assert!(message.contains("4040010"));
        assert!(message.contains("Transaction id not found"));
        assert_eq!(err.api_error().map(|e| e.error_code), Some(4040010));
    }

    #[test]
    fn test_retryable_vendor_codes() {
        assert!(!api_error(4040010).is_retryable());
        assert!(api_error(4290000).is_retryable());
        assert!(api_error(5000001).is_retryable());
    }

    #[test]
    fn test_unsupported_method_display() {
        let err = StoreKitError::UnsupportedMethod(Method::DELETE);
        assert_eq!(err.to_string(), "method DELETE not supported");
    }
}
