mod commands;
mod feedback;
mod logging;
mod table;

use clap::{Parser, Subcommand};
use colored::Colorize;
use dotenvy::dotenv;
use service::app_services::create_app_services;
use service::view_models::Settings;

use crate::commands::{customers::CustomerCommands, quotes::QuoteCommands};

#[derive(Parser)]
#[command(name = "quote-admin")]
#[command(about = "Admin console for managing customers and price quotes")]
struct Cli {
    /// Backend base URL (overrides QUOTE_ADMIN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the console
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show whether a session is active
    Whoami,
    /// Manage customers
    Customers {
        #[command(subcommand)]
        command: CustomerCommands,
    },
    /// Manage quotes and their line items
    Quotes {
        #[command(subcommand)]
        command: QuoteCommands,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();
    let _guard = logging::init_logging();

    let settings = match cli.api_url.clone() {
        Some(api_base_url) => Settings { api_base_url },
        None => Settings::from_env(),
    };
    tracing::debug!(api_base_url = %settings.api_base_url, "resolved backend");
    let services = create_app_services(settings);

    if let Err(error) = commands::dispatch(cli.command, &services).await {
        eprintln!("{} {}", "Error:".red(), error);
        std::process::exit(1);
    }
}
