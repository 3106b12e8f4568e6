//! Insight and forecast command implementations

use anyhow::Result;
use chrono::NaiveDate;
use coach_core::{
    compute_forecast, compute_insights, months_needed, GoalForecast, TransactionStore,
};

use super::{load_transactions, print_no_data_hint};

pub fn cmd_insights(store: &dyn TransactionStore, today: NaiveDate, json: bool) -> Result<()> {
    let transactions = load_transactions(store)?.unwrap_or_default();
    let report = compute_insights(&transactions, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        print_no_data_hint();
        return Ok(());
    }

    println!();
    println!("📊 Spending (last 30 days)");
    println!("   ─────────────────────────────────────────");
    let mut spend: Vec<_> = report.category_spend_last_30d.iter().collect();
    spend.sort_by(|a, b| b.1.total_cmp(a.1));
    for (category, amount) in spend {
        println!("   {:<24} ${:>10.2}", category, amount);
    }

    if !report.subscriptions.is_empty() {
        println!();
        println!("🔁 Subscriptions");
        for sub in &report.subscriptions {
            println!(
                "   {:<24} ${:>8.2}  ({} charges)",
                sub.merchant, sub.avg_amount, sub.occurrences
            );
        }
    }

    if !report.anomalies.is_empty() {
        println!();
        println!("⚠️  Unusual months");
        for anomaly in &report.anomalies {
            println!(
                "   {:<24} ${:.2} (over {} months)",
                anomaly.category, anomaly.latest_total, anomaly.months
            );
        }
    }

    if !report.trend_insights.is_empty() {
        println!();
        println!("📈 Trends");
        for trend in &report.trend_insights {
            println!("   {}", trend.sentence);
            println!("     → {}", trend.advice);
        }
    }

    if !report.tips.is_empty() {
        println!();
        println!("💡 Tips");
        for tip in &report.tips {
            println!("   {}", tip);
        }
    }

    Ok(())
}

pub fn cmd_forecast(
    store: &dyn TransactionStore,
    goal_amount: f64,
    months: u32,
    json: bool,
) -> Result<()> {
    let forecast = match load_transactions(store)? {
        Some(transactions) => compute_forecast(&transactions, goal_amount, months),
        None => GoalForecast::zeroed(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    println!();
    println!("🎯 Goal forecast for ${:.2}", goal_amount);
    println!(
        "   Average monthly surplus: ${:.2}",
        forecast.monthly_surplus_estimate
    );
    println!("   {}", months_needed_line(&forecast, goal_amount, months));

    Ok(())
}

/// Months-needed summary, noting when the goal lies beyond the horizon
pub fn months_needed_line(forecast: &GoalForecast, goal_amount: f64, months: u32) -> String {
    let uncapped = months_needed(goal_amount, forecast.monthly_surplus_estimate);
    if uncapped > i64::from(months) {
        format!(
            "Months needed: {} or more (forecast horizon)",
            forecast.projected_months_needed
        )
    } else {
        format!("Months needed: {}", forecast.projected_months_needed)
    }
}
