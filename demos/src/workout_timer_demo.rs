use std::env;
use std::time::{Duration, Instant};

use dotenv::dotenv;
use zenmotion_rust::dashboard::TimedWorkout;
use zenmotion_rust::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();

    let email = env::var("ZENMOTION_EMAIL").expect("ZENMOTION_EMAIL must be set");
    let password = env::var("ZENMOTION_PASSWORD").expect("ZENMOTION_PASSWORD must be set");
    let seconds: u64 = env::var("TIMER_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);

    let zen = ZenMotion::from_env()?;
    zen.auth().login(&email, &password).await?;

    let started = Instant::now();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    for _ in 0..=seconds {
        ticker.tick().await;
        println!("{}", TimedWorkout::from_duration(started.elapsed()).display());
    }

    let timed = TimedWorkout::from_duration(started.elapsed());
    println!(
        "Finished: {} min, {:.0} kcal",
        timed.minutes(),
        timed.calories()
    );

    let workout = zen.log_timed_workout(timed, None).await?;
    println!("Saved workout {} ({})", workout.id, workout.kind);

    let today = zen.todays_workouts().await?;
    println!("{} workout(s) logged today", today.len());

    Ok(())
}
