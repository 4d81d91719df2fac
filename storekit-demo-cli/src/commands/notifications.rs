//! Notifications command - one page of notification history

use anyhow::{Context, Result};
use chrono::DateTime;
use storekit_lib::models::NotificationHistoryRequest;
use storekit_lib::AppStoreServerApiClient;

use crate::ui;

/// Filters collected from the command line.
#[derive(Debug, Default)]
pub struct NotificationFilter {
    pub start: String,
    pub end: String,
    pub pagination_token: Option<String>,
    pub transaction_id: Option<String>,
    pub notification_type: Option<String>,
    pub notification_subtype: Option<String>,
    pub only_failures: bool,
}

impl NotificationFilter {
    /// Build the request body, converting RFC 3339 dates to epoch milliseconds.
    pub fn to_request(&self) -> Result<NotificationHistoryRequest> {
        let mut request =
            NotificationHistoryRequest::new(parse_millis(&self.start)?, parse_millis(&self.end)?);

        if let Some(kind) = &self.notification_type {
            request = request.with_notification_type(kind, self.notification_subtype.clone());
        }
        if let Some(id) = &self.transaction_id {
            request = request.with_transaction_id(id);
        }
        if self.only_failures {
            request = request.only_failures();
        }
        Ok(request)
    }
}

fn parse_millis(value: &str) -> Result<i64> {
    let date = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid RFC 3339 date: {}", value))?;
    Ok(date.timestamp_millis())
}

#[tracing::instrument(skip(client))]
pub async fn run(client: &AppStoreServerApiClient, filter: &NotificationFilter, json: bool) -> Result<()> {
    let request = filter.to_request()?;

    let spinner = ui::spinner("Fetching notification history...");
    let result = client
        .get_notification_history(&request, filter.pagination_token.as_deref().unwrap_or_default())
        .await;
    spinner.finish_and_clear();

    let Some(page) = result.map_err(super::report)? else {
        ui::info("No notification history returned");
        return Ok(());
    };

    if json {
        ui::json(&page)?;
        return Ok(());
    }

    ui::header("Notification History");
    for item in &page.notification_history {
        ui::separator();
        println!("{}", item.signed_payload);
        for attempt in &item.send_attempts {
            ui::key_value(&attempt.attempt_date.to_string(), &attempt.send_attempt_result);
        }
    }

    ui::success(&format!("{} notification(s)", page.notification_history.len()));
    if page.has_more {
        if let Some(token) = &page.pagination_token {
            ui::info(&format!("More available: --pagination-token {}", token));
        }
    }
    Ok(())
}
