use serde::{Deserialize, Serialize};

/// Statuses for all of a customer's auto-renewable subscriptions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatusResponse {
    /// Server environment, `Sandbox` or `Production`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Bundle identifier of the app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    /// Apple ID of the app; absent in sandbox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_apple_id: Option<i64>,
    /// One entry per subscription group.
    #[serde(default)]
    pub data: Vec<SubscriptionGroupIdentifierItem>,
}

impl SubscriptionStatusResponse {
    /// Iterate the latest transaction of every subscription in every group.
    pub fn last_transactions(&self) -> impl Iterator<Item = &LastTransactionsItem> {
        self.data.iter().flat_map(|group| group.last_transactions.iter())
    }
}

/// Subscriptions grouped by subscription group identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionGroupIdentifierItem {
    #[serde(default)]
    pub subscription_group_identifier: String,
    #[serde(default)]
    pub last_transactions: Vec<LastTransactionsItem>,
}

/// Most recent transaction for one subscription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastTransactionsItem {
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub original_transaction_id: String,
    /// Transaction info in JWS format, signed by Apple.
    #[serde(default)]
    pub signed_transaction_info: String,
    /// Renewal info in JWS format, signed by Apple.
    #[serde(default)]
    pub signed_renewal_info: String,
}

/// Status of an auto-renewable subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    BillingRetry,
    BillingGracePeriod,
    Revoked,
    /// A status value this client does not know about.
    Unknown(i32),
}

impl SubscriptionStatus {
    /// Whether the customer currently has access to the subscription.
    pub fn grants_access(&self) -> bool {
        matches!(self, Self::Active | Self::BillingGracePeriod)
    }
}

impl From<i32> for SubscriptionStatus {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Active,
            2 => Self::Expired,
            3 => Self::BillingRetry,
            4 => Self::BillingGracePeriod,
            5 => Self::Revoked,
            other => Self::Unknown(other),
        }
    }
}

impl From<SubscriptionStatus> for i32 {
    fn from(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::Active => 1,
            SubscriptionStatus::Expired => 2,
            SubscriptionStatus::BillingRetry => 3,
            SubscriptionStatus::BillingGracePeriod => 4,
            SubscriptionStatus::Revoked => 5,
            SubscriptionStatus::Unknown(other) => other,
        }
    }
}
