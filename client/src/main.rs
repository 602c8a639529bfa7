//! Stock Withdrawal Management - command line client
//!
//! Browse withdrawal history grouped by bill, export bills to PDF or a
//! print document, and add users.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shared::{Role, SortOrder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_withdrawal_client::export::{notify_on_failure, Exporter};
use stock_withdrawal_client::external::StockApiClient;
use stock_withdrawal_client::handlers;
use stock_withdrawal_client::services::history::HISTORY_LOADING_TH;
use stock_withdrawal_client::services::{Notifier, SubmitOutcome};
use stock_withdrawal_client::Config;

#[derive(Debug, Parser)]
#[command(name = "swm", version, about = "Stock withdrawal management")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show withdrawal history grouped by bill
    History {
        /// latest or oldest
        #[arg(long, default_value = "latest")]
        order: SortOrder,

        /// Show line items of this bill (repeatable)
        #[arg(long = "expand", value_name = "BILL")]
        expand: Vec<String>,
    },

    /// Save one bill as `{BILL}-order-history.pdf`
    ExportPdf {
        bill_id: String,

        /// Output directory (defaults to export.output_dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a print document for the given bills (all when none) and open it
    Print { bill_ids: Vec<String> },

    /// Create a user
    AddUser {
        #[arg(long)]
        username: String,

        #[arg(long, env = "SWM_NEW_USER_PASSWORD")]
        password: String,

        /// admin or user
        #[arg(long, default_value = "user")]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swm=info,stock_withdrawal_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // `.env` first so clap's `env` fallbacks can see it
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;
    tracing::debug!("Environment: {}", config.environment);

    let api = StockApiClient::new(&config.api)?;
    let exporter = Exporter::new(&config);
    let options = config.display.options();
    let mut notifier = Notifier::new(config.notification.dismiss_after());

    if !matches!(cli.command, Command::AddUser { .. }) {
        eprintln!("{}", HISTORY_LOADING_TH);
    }

    let ok = match cli.command {
        Command::History { order, expand } => {
            match handlers::show_history(&api, &options, order, &expand).await {
                Ok(table) => {
                    print!("{}", table);
                    true
                }
                Err(e) => {
                    eprintln!("{}", e.message_th());
                    false
                }
            }
        }
        Command::ExportPdf { bill_id, out } => {
            let result = handlers::export_pdf(&api, &exporter, &bill_id, out.as_deref()).await;
            match notify_on_failure(result, &mut notifier) {
                Some(path) => {
                    println!("{}", path.display());
                    true
                }
                None => false,
            }
        }
        Command::Print { bill_ids } => {
            let result = handlers::print_bills(&api, &exporter, &bill_ids).await;
            match notify_on_failure(result, &mut notifier) {
                Some(path) => {
                    println!("{}", path.display());
                    true
                }
                None => false,
            }
        }
        Command::AddUser {
            username,
            password,
            role,
        } => {
            let (_, outcome) =
                handlers::add_user(&api, &username, &password, role, &mut notifier).await;
            match outcome {
                SubmitOutcome::Created => true,
                SubmitOutcome::Failed(message) | SubmitOutcome::Rejected(message) => {
                    eprintln!("{}", message);
                    false
                }
            }
        }
    };

    for notification in notifier.active() {
        eprintln!("[{}] {}", notification.kind, notification.message);
    }

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_read_from_dotenv_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "SWM_NEW_USER_PASSWORD=from-dotenv\n").unwrap();
        dotenvy::from_path(&env_file).unwrap();

        let cli = Cli::try_parse_from(["swm", "add-user", "--username", "alice"]).unwrap();
        match cli.command {
            Command::AddUser { username, password, role } => {
                assert_eq!(username, "alice");
                assert_eq!(password, "from-dotenv");
                assert_eq!(role, Role::User);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_history_arguments() {
        let cli = Cli::try_parse_from(["swm", "history", "--order", "oldest", "--expand", "B1"])
            .unwrap();
        match cli.command {
            Command::History { order, expand } => {
                assert_eq!(order, SortOrder::Oldest);
                assert_eq!(expand, vec!["B1".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
