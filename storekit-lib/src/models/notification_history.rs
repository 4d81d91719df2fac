use serde::{Deserialize, Serialize};

/// Filter for the notification history endpoint.
///
/// Dates are milliseconds since the Unix epoch. The server keeps roughly
/// six months of history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHistoryRequest {
    pub start_date: i64,
    pub end_date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_subtype: Option<String>,
    /// Restrict to notifications for one transaction. Mutually exclusive with
    /// the type filters on the server side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_failures: Option<bool>,
}

impl NotificationHistoryRequest {
    /// Create a request covering `[start_date, end_date]` in epoch milliseconds.
    pub fn new(start_date: i64, end_date: i64) -> Self {
        Self {
            start_date,
            end_date,
            ..Self::default()
        }
    }

    /// Filter by notification type and optional subtype.
    pub fn with_notification_type(
        mut self,
        notification_type: impl Into<String>,
        subtype: Option<String>,
    ) -> Self {
        self.notification_type = Some(notification_type.into());
        self.notification_subtype = subtype;
        self
    }

    /// Filter by transaction identifier.
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Only return notifications that never reached your server.
    pub fn only_failures(mut self) -> Self {
        self.only_failures = Some(true);
        self
    }
}

/// One page of notification history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHistoryResponse {
    /// Token to request the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub notification_history: Vec<NotificationHistoryResponseItem>,
}

/// A notification and the delivery attempts made for it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHistoryResponseItem {
    /// Notification payload in JWS format, signed by Apple.
    #[serde(default)]
    pub signed_payload: String,
    #[serde(default)]
    pub send_attempts: Vec<SendAttemptItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAttemptItem {
    /// Epoch milliseconds.
    #[serde(default)]
    pub attempt_date: i64,
    /// `SUCCESS`, `TIMED_OUT`, `NO_RESPONSE`, ...
    #[serde(default)]
    pub send_attempt_result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = NotificationHistoryRequest::new(1_700_000_000_000, 1_700_086_400_000)
            .with_notification_type("DID_RENEW", None)
            .only_failures();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "startDate": 1_700_000_000_000i64,
                "endDate": 1_700_086_400_000i64,
                "notificationType": "DID_RENEW",
                "onlyFailures": true
            })
        );
    }

    #[test]
    fn test_parse_history_page() {
        let page: NotificationHistoryResponse = serde_json::from_value(serde_json::json!({
            "paginationToken": "ptok",
            "hasMore": true,
            "notificationHistory": [{
                "signedPayload": "eyJ...",
                "sendAttempts": [
                    {"attemptDate": 1698148900000i64, "sendAttemptResult": "NO_RESPONSE"},
                    {"attemptDate": 1698148950000i64, "sendAttemptResult": "SUCCESS"}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(page.pagination_token.as_deref(), Some("ptok"));
        assert_eq!(page.notification_history[0].send_attempts.len(), 2);
        assert_eq!(
            page.notification_history[0].send_attempts[1].send_attempt_result,
            "SUCCESS"
        );
    }
}
