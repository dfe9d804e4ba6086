//! Fetch-and-aggregate operations for the logged-in user

use log::debug;

use super::budget::{CalorieBudget, DailyGoals, StepBudget};
use super::daily::{steps_on, DailyTotals};
use super::day::{DayKey, Timestamped};
use super::report::ProgressReport;
use super::timer::TimedWorkout;
use super::weekly::WeeklyActivity;
use crate::error::Result;
use crate::resources::{Goal, Meal, Workout};
use crate::ZenMotion;

/// Everything the home screen shows for one day
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub day: DayKey,
    pub totals: DailyTotals,
    pub steps: i64,
    pub goals: DailyGoals,
    pub calorie_budget: CalorieBudget,
    pub step_budget: StepBudget,
    /// The day's meals, in server order
    pub meals: Vec<Meal>,
    /// The day's workouts, in server order
    pub workouts: Vec<Workout>,
}

impl ZenMotion {
    /// Totals, step count and goal budgets for the logged-in user on `day`.
    ///
    /// Without stored preferences the account defaults apply.
    pub async fn daily_summary(&self, day: &DayKey) -> Result<DailySummary> {
        let user_id = self.auth.require_user_id()?;

        let meals = self.meals();
        let workouts = self.workouts();
        let step_records = self.step_records();
        let preferences = self.preferences();

        let (meals, workouts, step_records, preferences) = tokio::try_join!(
            meals.list_for_user(user_id),
            workouts.list_for_user(user_id),
            step_records.list_for_user(user_id),
            preferences.list_for_user(user_id),
        )?;

        let meals: Vec<Meal> = meals.into_iter().filter(|m| m.falls_on(day)).collect();
        let workouts: Vec<Workout> = workouts.into_iter().filter(|w| w.falls_on(day)).collect();
        let steps = steps_on(&step_records, day);

        let totals = DailyTotals::from_records(&meals, &workouts);
        let goals = DailyGoals::from_preferences(preferences.first());
        debug!(
            "daily summary for user {} on {}: {} meals, {} workouts, {} steps",
            user_id,
            day,
            meals.len(),
            workouts.len(),
            steps
        );

        Ok(DailySummary {
            day: day.clone(),
            totals,
            steps,
            goals,
            calorie_budget: CalorieBudget::new(goals.calories, totals.calories_consumed),
            step_budget: StepBudget::new(goals.steps, steps),
            meals,
            workouts,
        })
    }

    /// Steps and calories burned over the seven days ending on `end_day`
    pub async fn weekly_activity(&self, end_day: &DayKey) -> Result<WeeklyActivity> {
        let user_id = self.auth.require_user_id()?;

        let step_records = self.step_records();
        let workouts = self.workouts();
        let (step_records, workouts) = tokio::try_join!(
            step_records.list_for_user(user_id),
            workouts.list_for_user(user_id),
        )?;

        Ok(WeeklyActivity::build(end_day, &step_records, &workouts))
    }

    /// The logged-in user's goals
    pub async fn user_goals(&self) -> Result<Vec<Goal>> {
        let user_id = self.auth.require_user_id()?;
        self.goals().list_for_user(user_id).await
    }

    /// Flip a goal's completion flag and return the stored goal
    pub async fn toggle_goal(&self, goal: &Goal) -> Result<Goal> {
        self.auth.require_user_id()?;
        self.goals().update(goal.id, &goal.toggled()).await
    }

    /// Weight and calorie series from the user's health reports, with the
    /// latest prediction
    pub async fn progress_report(&self) -> Result<ProgressReport> {
        let user_id = self.auth.require_user_id()?;

        let reports = self.health_reports();
        let predictions = self.predictions();
        let (reports, predictions) = tokio::try_join!(
            reports.list_for_user(user_id),
            predictions.list_for_user(user_id),
        )?;

        Ok(ProgressReport::build(&reports, &predictions))
    }

    /// The user's workouts logged today on the local clock
    pub async fn todays_workouts(&self) -> Result<Vec<Workout>> {
        let user_id = self.auth.require_user_id()?;
        let today = DayKey::today();

        let mut workouts = self.workouts().list_for_user(user_id).await?;
        workouts.retain(|w| w.falls_on(&today));
        Ok(workouts)
    }

    /// Save a stopwatch session as a workout for the logged-in user
    pub async fn log_timed_workout(&self, timed: TimedWorkout, kind: Option<&str>) -> Result<Workout> {
        let user_id = self.auth.require_user_id()?;
        self.workouts()
            .create(&timed.to_new_workout(user_id, kind))
            .await
    }
}
