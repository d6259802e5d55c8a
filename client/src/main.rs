//! Command-line smoke client for the Pixel API.
//!
//! ```text
//! client login <email> <password>
//! client me
//! client feed [--page N] [--limit N]
//! client unread
//! client logout
//! ```
//!
//! The session is persisted to `AUTH_STORAGE_PATH` between invocations.
//! Results are printed to stdout as JSON; logs go to stderr.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::PaginationParams;

use client::{build_auth, ApiClient, ApiServices, ClientConfig, FileStore, Result, TokenStore};

#[derive(Debug, Parser)]
#[command(name = "client", version, about = "Pixel API command-line client")]
struct Cli {
    /// Override API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and store the session.
    Login { email: String, password: String },
    /// Show the logged-in user.
    Me,
    /// Show one page of the home feed.
    Feed {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show the unread notification count.
    Unread,
    /// End the session.
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(base_url) = cli.base_url.clone() {
        config.api_base_url = base_url.trim_end_matches('/').to_string();
    }
    let _log_guard = client::logger::init(&config);

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            if e.is_session_ended() {
                eprintln!("Session ended, run `client login` again");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: ClientConfig) -> Result<()> {
    config.validate()?;
    let storage = Arc::new(FileStore::new(&config.storage_path));
    let tokens = Arc::new(TokenStore::new(storage));
    let restored = tokens.restore().await?;
    tracing::debug!(restored, storage = %config.storage_path.display(), "Session loaded");

    let api_client = Arc::new(ApiClient::from_config(&config, tokens)?);
    let auth = build_auth(&config, api_client.clone());
    let api = ApiServices::new(api_client);

    match command {
        Command::Login { email, password } => print_json(&auth.login(&email, &password).await?.user),
        Command::Me => print_json(&auth.current_user().await?),
        Command::Feed { page, limit } => {
            let mut params = PaginationParams::page(page);
            if let Some(limit) = limit {
                params = params.with_limit(limit);
            }
            print_json(&api.posts.get_feed(Some(&params)).await?)
        }
        Command::Unread => print_json(&serde_json::json!({ "count": api.notifications.get_unread_count().await })),
        Command::Logout => {
            auth.logout().await?;
            print_json(&serde_json::json!({ "loggedOut": true }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| client::ApiError::Encode(format!("Failed to format output: {}", e)))?;
    println!("{}", out);
    Ok(())
}
