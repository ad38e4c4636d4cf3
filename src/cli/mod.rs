use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod init;
pub mod preview;
pub mod serve;
pub mod simulate;

use crate::core::{AppConfig, telemetry::init_tracing};

#[derive(Subcommand)]
enum Command {
    /// Initialize the subscription database
    Init {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Print the notification a push payload would produce
    Preview {
        /// Raw payload, JSON or plain text. Omit for an empty push
        #[arg(long)]
        payload: Option<String>,
    },
    /// Run a push and a user interaction against an in-memory host
    Simulate {
        #[arg(long)]
        payload: Option<String>,
        /// Action button pressed, e.g. "open" or "close". Omit for a
        /// click on the notification body
        #[arg(long, conflicts_with = "dismiss")]
        action: Option<String>,
        /// Dismiss the notification instead of clicking it
        #[arg(long, action, default_value = "false")]
        dismiss: bool,
        /// URL of an already open window, may be repeated
        #[arg(long = "window")]
        windows: Vec<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Init { db }) => {
            init::run(db, &config.db_path).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Preview { payload }) => {
            preview::run(payload.as_deref(), &config)?;
        }
        Some(Command::Simulate {
            payload,
            action,
            dismiss,
            windows,
        }) => {
            let interaction = if dismiss {
                simulate::Interaction::Dismiss
            } else {
                simulate::Interaction::Click(action)
            };
            simulate::run(payload.as_deref(), interaction, windows, &config).await?;
        }
        None => {}
    }

    Ok(())
}
