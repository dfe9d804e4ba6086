//! Daily nutrition and activity totals

use super::day::{on_day, DayKey, Timestamped};
use crate::resources::{Meal, StepRecord, Workout};

/// Sums over one day's meals and workouts
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyTotals {
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl DailyTotals {
    /// Sum the given meals and workouts. Empty input gives all zeros.
    pub fn from_records<'a, M, W>(meals: M, workouts: W) -> Self
    where
        M: IntoIterator<Item = &'a Meal>,
        W: IntoIterator<Item = &'a Workout>,
    {
        let totals = meals.into_iter().fold(Self::default(), |acc, meal| Self {
            calories_consumed: acc.calories_consumed + meal.calories,
            carbs: acc.carbs + meal.carbs,
            protein: acc.protein + meal.protein,
            fat: acc.fat + meal.fat,
            ..acc
        });

        Self {
            calories_burned: workouts.into_iter().map(|w| w.calories_burned).sum(),
            ..totals
        }
    }

    /// Consumed minus burned
    pub fn net_calories(&self) -> f64 {
        self.calories_consumed - self.calories_burned
    }
}

/// Totals over every given record
pub fn aggregate(meals: &[Meal], workouts: &[Workout]) -> DailyTotals {
    DailyTotals::from_records(meals, workouts)
}

/// Totals over the records that fall on `day`
pub fn aggregate_day(meals: &[Meal], workouts: &[Workout], day: &DayKey) -> DailyTotals {
    DailyTotals::from_records(on_day(meals, day), on_day(workouts, day))
}

/// Steps recorded on `day`, saturating at `i64::MAX`
pub fn steps_on(records: &[StepRecord], day: &DayKey) -> i64 {
    records
        .iter()
        .filter(|r| r.falls_on(day))
        .fold(0i64, |total, r| total.saturating_add(r.steps))
}

/// Minutes trained across the given workouts
pub fn workout_minutes<'a, W>(workouts: W) -> i64
where
    W: IntoIterator<Item = &'a Workout>,
{
    workouts
        .into_iter()
        .fold(0i64, |total, w| total.saturating_add(w.duration_minutes))
}
