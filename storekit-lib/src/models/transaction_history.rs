use serde::{Deserialize, Serialize};

/// One page of a customer's in-app purchase transaction history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryResponse {
    /// Token to pass as `revision` to fetch the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_apple_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Transactions in JWS format, signed by Apple.
    #[serde(default)]
    pub signed_transactions: Vec<String>,
}

impl TransactionHistoryResponse {
    /// Revision token for the next page, if the server reported more data.
    pub fn next_revision(&self) -> Option<&str> {
        if self.has_more {
            self.revision.as_deref()
        } else {
            None
        }
    }
}
