//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_store, load_transactions)
//! - `goals` - Goal planning with the advisor
//! - `insights` - Insight report and goal forecast
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (list, add)

pub mod core;
pub mod goals;
pub mod insights;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use self::core::*;
pub use goals::*;
pub use insights::*;
pub use serve::*;
pub use transactions::*;

/// Truncate to `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Colored signed amount: red for expenses, green for income
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("\x1b[31m-${:.2}\x1b[0m", amount.abs())
    } else {
        format!("\x1b[32m+${:.2}\x1b[0m", amount)
    }
}
