//! Subscriptions command - all subscription statuses for a transaction

use anyhow::Result;
use storekit_lib::AppStoreServerApiClient;

use crate::ui;

#[tracing::instrument(skip(client))]
pub async fn run(client: &AppStoreServerApiClient, transaction_id: &str, json: bool) -> Result<()> {
    let spinner = ui::spinner("Fetching subscription statuses...");
    let result = client.get_all_subscription_statuses(transaction_id).await;
    spinner.finish_and_clear();

    let Some(response) = result.map_err(super::report)? else {
        ui::info("No subscription statuses returned");
        return Ok(());
    };

    if json {
        ui::json(&response)?;
        return Ok(());
    }

    ui::header("Subscription Statuses");
    if let Some(environment) = &response.environment {
        ui::key_value("Environment", environment);
    }

    if response.data.is_empty() {
        ui::info("No subscriptions found");
        return Ok(());
    }

    for group in &response.data {
        ui::separator();
        ui::key_value("Group", &group.subscription_group_identifier);
        for item in &group.last_transactions {
            let access = if item.status.grants_access() {
                "access"
            } else {
                "no access"
            };
            ui::key_value(
                &item.original_transaction_id,
                &format!("{:?} ({})", item.status, access),
            );
        }
    }

    ui::success(&format!(
        "{} subscription(s)",
        response.last_transactions().count()
    ));
    Ok(())
}
