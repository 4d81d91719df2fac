//! StoreKit Demo CLI
//!
//! Command-line interface for exercising the App Store Server API client.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "storekit-demo")]
#[command(about = "StoreKit Demo CLI - Query the App Store Server API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file (defaults to APPSTORE_* environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the production environment instead of sandbox
    #[arg(long, global = true)]
    production: bool,

    /// Print raw JSON responses
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a bearer token and show its claims
    Token {
        /// Print only the token
        #[arg(long)]
        raw: bool,
    },

    /// Show all subscription statuses for a customer
    Subscriptions {
        /// Any transaction ID belonging to the customer
        transaction_id: String,
    },

    /// Show one page of a customer's transaction history
    History {
        /// Any transaction ID belonging to the customer
        transaction_id: String,

        /// Revision token from the previous page
        #[arg(short, long)]
        revision: Option<String>,
    },

    /// Show one page of notification history
    Notifications {
        /// Start of the window (RFC 3339)
        #[arg(long)]
        start: String,

        /// End of the window (RFC 3339)
        #[arg(long)]
        end: String,

        /// Pagination token from the previous page
        #[arg(long)]
        pagination_token: Option<String>,

        /// Only notifications for this transaction
        #[arg(long)]
        transaction_id: Option<String>,

        /// Notification type filter (e.g. SUBSCRIBED)
        #[arg(long)]
        notification_type: Option<String>,

        /// Notification subtype filter (requires --notification-type)
        #[arg(long, requires = "notification_type")]
        notification_subtype: Option<String>,

        /// Only notifications that failed to reach the server
        #[arg(long)]
        only_failures: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON and raw token output stay pipeable
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("storekit_demo_cli=debug,storekit_lib=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("storekit_demo_cli=info,storekit_lib=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = commands::load_config(cli.config.as_deref(), cli.production)?;

    match cli.command {
        Commands::Token { raw } => {
            commands::token::run(&config, raw)?;
        }

        Commands::Subscriptions { transaction_id } => {
            let client = commands::build_client(config, cli.verbose)?;
            commands::subscriptions::run(&client, &transaction_id, cli.json).await?;
        }

        Commands::History {
            transaction_id,
            revision,
        } => {
            let client = commands::build_client(config, cli.verbose)?;
            commands::history::run(&client, &transaction_id, revision.as_deref(), cli.json)
                .await?;
        }

        Commands::Notifications {
            start,
            end,
            pagination_token,
            transaction_id,
            notification_type,
            notification_subtype,
            only_failures,
        } => {
            let filter = commands::notifications::NotificationFilter {
                start,
                end,
                pagination_token,
                transaction_id,
                notification_type,
                notification_subtype,
                only_failures,
            };
            let client = commands::build_client(config, cli.verbose)?;
            commands::notifications::run(&client, &filter, cli.json).await?;
        }
    }

    Ok(())
}
