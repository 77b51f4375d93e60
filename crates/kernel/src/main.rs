//! Courseware kernel CLI
//!
//! Summarizes Studio validation results and submits password reset requests.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use courseware_kernel::Config;
use courseware_kernel::cli;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the summary, detail lines, and CSS classes of a validation state.
    Summarize {
        /// JSON file, or `-` for stdin.
        file: PathBuf,
    },

    /// Normalize a Studio validation document to its JSON form.
    StudioJson {
        /// JSON file, or `-` for stdin.
        file: PathBuf,
    },

    /// Request a password reset email.
    ResetPassword {
        /// Account email address.
        #[arg(long)]
        email: String,

        /// Reset endpoint; overrides RESET_ENDPOINT_URL.
        #[arg(long)]
        endpoint: Option<String>,

        /// Cookie header holding the anti-forgery token, e.g. "csrftoken=abc".
        #[arg(long)]
        cookie: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    match args.command {
        Command::Summarize { file } => cli::cmd_summarize(&file),
        Command::StudioJson { file } => cli::cmd_studio_json(&file),
        Command::ResetPassword {
            email,
            endpoint,
            cookie,
        } => {
            let config = Config::from_env().context("failed to load configuration")?;
            info!(endpoint = %config.reset_endpoint_url, "Configuration loaded");
            cli::cmd_reset_password(&config, &email, endpoint.as_deref(), cookie.as_deref()).await
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
