//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use coach_core::forecast::{DEFAULT_FORECAST_MONTHS, DEFAULT_GOAL_AMOUNT};

/// Coach - Understand your spending and plan savings goals
#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Personal finance analytics helper", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction data file (JSON array)
    #[arg(long, default_value = "data/sample_transactions.json", global = true)]
    pub data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stored transactions
    Transactions {
        /// Maximum number to show (most recent first)
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a manual transaction dated today
    Add {
        /// Signed amount (negative for expenses)
        #[arg(short, long, allow_negative_numbers = true)]
        amount: f64,

        /// Spending category (e.g. "Food & Drink")
        #[arg(short, long)]
        category: String,

        /// Description, stored as the merchant name
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show category spend, subscriptions, anomalies, trends, and tips
    Insights {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forecast months needed to reach a savings goal
    Forecast {
        /// Goal amount
        #[arg(short, long, default_value_t = DEFAULT_GOAL_AMOUNT)]
        goal: f64,

        /// Forecast horizon in months
        #[arg(short, long, default_value_t = DEFAULT_FORECAST_MONTHS)]
        months: u32,

        /// Print the forecast as JSON
        #[arg(long)]
        json: bool,
    },

    /// Plan a savings goal with a recommendation
    Goal {
        /// Goal amount
        #[arg(short, long)]
        amount: f64,

        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        target_date: NaiveDate,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
