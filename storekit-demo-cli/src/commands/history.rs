//! History command - one page of transaction history

use anyhow::Result;
use storekit_lib::AppStoreServerApiClient;

use crate::ui;

#[tracing::instrument(skip(client))]
pub async fn run(
    client: &AppStoreServerApiClient,
    transaction_id: &str,
    revision: Option<&str>,
    json: bool,
) -> Result<()> {
    let spinner = ui::spinner("Fetching transaction history...");
    let result = client
        .get_transaction_history(transaction_id, revision.unwrap_or_default())
        .await;
    spinner.finish_and_clear();

    let Some(page) = result.map_err(super::report)? else {
        ui::info("No transaction history returned");
        return Ok(());
    };

    if json {
        ui::json(&page)?;
        return Ok(());
    }

    ui::header("Transaction History");
    ui::key_value("Transactions", &page.signed_transactions.len().to_string());
    ui::separator();
    for signed in &page.signed_transactions {
        println!("{}", signed);
    }

    if let Some(next) = page.next_revision() {
        ui::info(&format!("More available: --revision {}", next));
    }
    Ok(())
}
