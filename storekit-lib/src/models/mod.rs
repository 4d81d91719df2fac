//! Request and response shapes for the App Store Server API.
//!
//! Field names follow the vendor's camelCase JSON. Response fields are
//! optional or defaulted so that additions on the server side never break
//! deserialization.

mod error_response;
mod notification_history;
mod subscription_status;
mod transaction_history;

pub use error_response::ErrorResponse;
pub use notification_history::{
    NotificationHistoryRequest, NotificationHistoryResponse, NotificationHistoryResponseItem,
    SendAttemptItem,
};
pub use subscription_status::{
    LastTransactionsItem, SubscriptionGroupIdentifierItem, SubscriptionStatus,
    SubscriptionStatusResponse,
};
pub use transaction_history::TransactionHistoryResponse;
