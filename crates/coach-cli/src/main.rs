//! Coach CLI - Personal finance analytics helper
//!
//! Usage:
//!   coach transactions              List stored transactions
//!   coach add --amount -12.5 ...    Record a manual transaction
//!   coach insights                  Show spending insights
//!   coach forecast --goal 3000      Forecast a savings goal
//!   coach goal --amount 3000 ...    Plan a goal with a recommendation
//!   coach serve --port 8000         Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Transactions { limit } => {
            let store = commands::open_store(&cli.data);
            commands::cmd_transactions_list(&store, limit)
        }
        Commands::Add {
            amount,
            category,
            description,
        } => {
            let store = commands::open_store(&cli.data);
            commands::cmd_add(&store, amount, &category, description, today)
        }
        Commands::Insights { json } => {
            let store = commands::open_store(&cli.data);
            commands::cmd_insights(&store, today, json)
        }
        Commands::Forecast { goal, months, json } => {
            let store = commands::open_store(&cli.data);
            commands::cmd_forecast(&store, goal, months, json)
        }
        Commands::Goal {
            amount,
            target_date,
            json,
        } => {
            let store = commands::open_store(&cli.data);
            let advisor = coach_core::AdvisorClient::from_env();
            commands::cmd_goal(&store, &advisor, amount, target_date, today, json).await
        }
        Commands::Serve { port, host } => commands::cmd_serve(&cli.data, &host, port).await,
    }
}
