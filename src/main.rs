//! hyperforge - command line front end for the developer tools API
//!
//! Each subcommand issues one call through the client and prints the result
//! (or the classified error) as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use hyperforge_rs::sdk::{ApiClient, ClientConfig};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hyperforge", version, about = "Developer tools API client")]
struct Cli {
    /// YAML config file; HYPERFORGE_* environment variables are used otherwise
    #[arg(short, long, env = "HYPERFORGE_CONFIG")]
    config: Option<String>,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the caller's public IP
    Ip,
    /// Show the caller's user agent as the server sees it
    UserAgent,
    /// Show request headers as the server sees them
    Headers,
    /// Validate an email address
    ValidateEmail { email: String },
    /// Shorten a URL
    Shorten { url: String },
    /// Hash text server-side
    Hash {
        text: String,
        #[arg(short, long, default_value = "sha256")]
        algorithm: String,
    },
    /// Check a password hash against the breach corpus
    Breach { hash: String },
    /// Check API health
    Health,
    /// Test whether a URL is reachable
    Probe { url: String },
    /// Show admission window status
    RateLimit,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a request outcome; errors are printed as `{kind, message, httpStatus}`
fn print_outcome<T: Serialize>(
    outcome: hyperforge_rs::RequestOutcome<T>,
) -> anyhow::Result<ExitCode> {
    match outcome {
        Ok(value) => {
            print_json(&value)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_json(&e.report())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let client = ApiClient::new(config).context("failed to create API client")?;

    match cli.command {
        Command::Ip => print_outcome(client.ip_info().await),
        Command::UserAgent => print_outcome(client.user_agent().await),
        Command::Headers => print_outcome(client.headers().await),
        Command::ValidateEmail { email } => print_outcome(client.validate_email(&email).await),
        Command::Shorten { url } => print_outcome(client.shorten_url(&url).await),
        Command::Hash { text, algorithm } => {
            print_outcome(client.hash_text(&text, Some(&algorithm)).await)
        }
        Command::Breach { hash } => print_outcome(client.check_password_breach(&hash).await),
        Command::Health => {
            let healthy = client.health_check().await;
            print_json(&serde_json::json!({ "healthy": healthy }))?;
            Ok(if healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Probe { url } => {
            let result = client.probe(&url).await;
            print_json(&result)?;
            Ok(if result.reachable {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::RateLimit => {
            print_json(&client.rate_limit_status())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
