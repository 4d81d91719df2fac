use serde::{Deserialize, Serialize};

/// Error payload returned by the App Store on non-success responses.
///
/// Both fields are required: a body missing either one is not treated as a
/// vendor error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Numeric vendor error code, e.g. `4040010`.
    pub error_code: i64,
    /// Human-readable description.
    pub error_message: String,
}

impl ErrorResponse {
    /// `RateLimitExceededError`.
    pub const RATE_LIMIT_EXCEEDED: i64 = 4290000;

    /// Rate-limit class (`429xxxx`).
    pub fn is_rate_limited(&self) -> bool {
        self.error_code / 10_000 == 429
    }

    /// Server-side failure class (`5xxxxxx`).
    pub fn is_server_error(&self) -> bool {
        self.error_code >= 5_000_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vendor_error() {
        let error: ErrorResponse = serde_json::from_str(
            r#"{"errorCode": 4040010, "errorMessage": "Transaction id not found"}"#,
        )
        .unwrap();

        assert_eq!(error.error_code, 4040010);
        assert_eq!(error.error_message, "Transaction id not found");
        assert!(!error.is_rate_limited());
        assert!(!error.is_server_error());
    }

    #[test]
    fn test_partial_payload_is_rejected() {
        assert!(serde_json::from_str::<ErrorResponse>(r#"{"errorCode": 4000006}"#).is_err());
        assert!(serde_json::from_str::<ErrorResponse>(r#"{"message": "nope"}"#).is_err());
    }

    #[test]
    fn test_error_classes() {
        let limited = ErrorResponse {
            error_code: ErrorResponse::RATE_LIMIT_EXCEEDED,
            error_message: "Rate limit exceeded.".to_string(),
        };
        assert!(limited.is_rate_limited());

        let internal = ErrorResponse {
            error_code: 5000000,
            error_message: "An unknown error occurred.".to_string(),
        };
        assert!(internal.is_server_error());
    }
}
