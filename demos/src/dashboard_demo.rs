use std::env;

use dotenv::dotenv;
use log::info;
use zenmotion_rust::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();

    let email = env::var("ZENMOTION_EMAIL").expect("ZENMOTION_EMAIL must be set");
    let password = env::var("ZENMOTION_PASSWORD").expect("ZENMOTION_PASSWORD must be set");

    let zen = ZenMotion::from_env()?;
    info!("using API at {}", zen.options.base_url);

    // Reuse a stored session when there is one
    if zen.auth().restore().await?.is_none() {
        zen.auth().login(&email, &password).await?;
    }

    let today = DayKey::today();
    let summary = zen.daily_summary(&today).await?;

    println!("Dashboard for {}", summary.day);
    println!(
        "  eaten {:.0} kcal of {:.0} ({:.0}%)",
        summary.totals.calories_consumed,
        summary.goals.calories,
        summary.calorie_budget.progress() * 100.0
    );
    if summary.calorie_budget.is_exceeded() {
        println!("  over budget by {:.0} kcal", summary.calorie_budget.exceeded_by());
    } else {
        println!("  {:.0} kcal left", summary.calorie_budget.remaining());
    }
    println!("  burned {:.0} kcal", summary.totals.calories_burned);
    println!(
        "  carbs {:.1} g, protein {:.1} g, fat {:.1} g",
        summary.totals.carbs, summary.totals.protein, summary.totals.fat
    );
    println!("  steps {} of {}", summary.steps, summary.step_budget.goal);

    println!("\nLast 7 days");
    let week = zen.weekly_activity(&today).await?;
    for day in week.days() {
        println!(
            "  {} {}  {:>6} steps  {:>6.0} kcal",
            day.index, day.day, day.steps, day.calories_burned
        );
    }

    println!("\nGoals");
    for goal in zen.user_goals().await? {
        let mark = if goal.is_completed { "x" } else { " " };
        println!(
            "  [{}] {} {:.0}%",
            mark,
            goal.goal_type,
            goal.progress_bar_percent()
        );
    }

    let report = zen.progress_report().await?;
    if let Some(prediction) = report.prediction {
        println!(
            "\nPredicted: {:.1} kg/week towards {:.1} kg, {:.0} days left",
            prediction.weekly_loss, prediction.target_weight, prediction.days_remaining
        );
    }

    Ok(())
}
