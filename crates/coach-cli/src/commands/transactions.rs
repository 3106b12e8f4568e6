//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use coach_core::{NewTransaction, TransactionStore};

use super::{format_amount, load_transactions, print_no_data_hint, truncate};

pub fn cmd_transactions_list(store: &dyn TransactionStore, limit: usize) -> Result<()> {
    let Some(mut transactions) = load_transactions(store)? else {
        print_no_data_hint();
        return Ok(());
    };

    if transactions.is_empty() {
        print_no_data_hint();
        return Ok(());
    }

    let total = transactions.len();
    // Most recent first; stable so same-day entries keep file order
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions.truncate(limit);

    println!();
    println!("📝 Recent Transactions ({} of {})", transactions.len(), total);
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   {} │ {:>20} │ {:<18} │ {}",
            tx.date,
            format_amount(tx.amount),
            truncate(&tx.category, 18),
            truncate(&tx.merchant, 30)
        );
    }

    Ok(())
}

pub fn cmd_add(
    store: &dyn TransactionStore,
    amount: f64,
    category: &str,
    description: Option<String>,
    today: NaiveDate,
) -> Result<()> {
    let entry = NewTransaction {
        amount,
        category: category.trim().to_string(),
        description,
    };
    entry.validate()?;

    let tx = store
        .append_dated(entry, today)
        .context("Failed to save transaction")?;

    println!(
        "✅ Added transaction #{}: {} {} ({})",
        tx.id,
        format_amount(tx.amount),
        tx.merchant,
        tx.category
    );

    Ok(())
}
