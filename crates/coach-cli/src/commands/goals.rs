//! Goal planning command implementation

use anyhow::{bail, Result};
use chrono::NaiveDate;
use coach_core::{plan_goal, Advisor, Goal, TransactionStore};

use super::load_transactions;

pub async fn cmd_goal<A>(
    store: &dyn TransactionStore,
    advisor: &A,
    goal_amount: f64,
    target_date: NaiveDate,
    today: NaiveDate,
    json: bool,
) -> Result<()>
where
    A: Advisor + ?Sized,
{
    let goal = Goal {
        goal_amount,
        target_date,
    };
    goal.validate()?;

    let Some(transactions) = load_transactions(store)? else {
        bail!("No transactions found");
    };

    let plan = plan_goal(&transactions, &goal, today, advisor).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!();
    println!("🎯 Goal: ${:.2} by {}", goal.goal_amount, goal.target_date);
    println!(
        "   Projected months needed: {} (surplus ${:.2}/month)",
        plan.forecast.projected_months_needed, plan.forecast.monthly_surplus_estimate
    );
    println!();
    println!("   {}", plan.recommendation);
    println!();

    if plan.ai.used {
        println!(
            "   🤖 Recommendation by {} ({})",
            plan.ai.provider.as_deref().unwrap_or("advisor"),
            plan.ai.model.as_deref().unwrap_or("unknown model")
        );
    } else if let Some(reason) = &plan.ai.error {
        println!("   💡 Using built-in recommendation: {}", reason);
    }

    Ok(())
}
