//! Seven-day activity view

use super::daily::{steps_on, workout_minutes};
use super::day::{on_day, DayKey};
use crate::resources::{StepRecord, Workout};

/// Number of days in the weekly view
pub const WEEK_LEN: usize = 7;

/// One day of the weekly view
#[derive(Debug, Clone, PartialEq)]
pub struct DayActivity {
    /// Position in the week, 1 for the oldest day and 7 for the newest
    pub index: usize,
    pub day: DayKey,
    pub steps: i64,
    pub calories_burned: f64,
    pub workout_minutes: i64,
}

/// Steps and calories burned over the seven days ending on a given day
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyActivity {
    days: Vec<DayActivity>,
}

impl WeeklyActivity {
    /// Build the view for the week ending on `end_day`.
    ///
    /// Days without records are zero; records outside the week are ignored.
    pub fn build(end_day: &DayKey, steps: &[StepRecord], workouts: &[Workout]) -> Self {
        let days = (0..WEEK_LEN)
            .map(|i| {
                let day = end_day.days_before((WEEK_LEN - 1 - i) as u64);
                let burned = on_day(workouts, &day).map(|w| w.calories_burned).sum();
                let minutes = workout_minutes(on_day(workouts, &day));
                DayActivity {
                    index: i + 1,
                    steps: steps_on(steps, &day),
                    calories_burned: burned,
                    workout_minutes: minutes,
                    day,
                }
            })
            .collect();

        Self { days }
    }

    pub fn days(&self) -> &[DayActivity] {
        &self.days
    }

    pub fn total_steps(&self) -> i64 {
        self.days
            .iter()
            .fold(0i64, |total, d| total.saturating_add(d.steps))
    }

    pub fn total_calories_burned(&self) -> f64 {
        self.days.iter().map(|d| d.calories_burned).sum()
    }

    /// Mean steps per day over the week
    pub fn average_steps(&self) -> f64 {
        self.total_steps() as f64 / WEEK_LEN as f64
    }
}

impl IntoIterator for WeeklyActivity {
    type Item = DayActivity;
    type IntoIter = std::vec::IntoIter<DayActivity>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.into_iter()
    }
}
