use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;

use duedate_hook::cli::{self, OutputFormat};
use duedate_hook::config::Config;

#[derive(Parser)]
#[command(name = "duedate-hook")]
#[command(about = "Assigns due dates to work orders from their priority", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook receiver
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = duedate_hook::DEFAULT_PORT)]
        port: u16,
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },
    /// Print the signature header for a payload
    Sign {
        /// Payload file ("-" for stdin)
        #[arg(long, default_value = "-")]
        file: String,
        /// Webhook secret (default: $WEBHOOK_SECRET)
        #[arg(long)]
        secret: Option<String>,
        /// Unix timestamp to sign with (default: now)
        #[arg(long)]
        timestamp: Option<i64>,
    },
    /// Sign a payload and deliver it to a receiver
    Send {
        /// Receiver URL (e.g., "http://localhost:3000/webhooks/work-orders")
        #[arg(long)]
        url: String,
        /// Payload file ("-" for stdin)
        #[arg(long, default_value = "-")]
        file: String,
        /// Webhook secret (default: $WEBHOOK_SECRET)
        #[arg(long)]
        secret: Option<String>,
    },
    /// Show the due date a priority maps to
    DueDate {
        /// Priority tag (HIGH, MEDIUM, LOW, NONE)
        priority: Option<String>,
        /// Reference instant, RFC 3339 (default: now)
        #[arg(long)]
        now: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("duedate_hook=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Serve { port, host } => {
            let config = Config::from_env()?;
            let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
            duedate_hook::server::run_server(addr, config).await?;
        }
        Commands::Sign {
            file,
            secret,
            timestamp,
        } => {
            cli::run_sign(&file, secret.as_deref(), timestamp, format)?;
        }
        Commands::Send { url, file, secret } => {
            cli::run_send(&url, &file, secret.as_deref(), format).await?;
        }
        Commands::DueDate { priority, now } => {
            cli::run_due_date(priority.as_deref(), now.as_deref(), format)?;
        }
    }

    Ok(())
}
