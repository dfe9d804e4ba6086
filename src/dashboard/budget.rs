//! Intake and activity measured against a daily goal

use crate::resources::{Preferences, DEFAULT_DAILY_CALORIE_GOAL, DEFAULT_DAILY_STEP_GOAL};

fn ratio(value: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        (value / goal).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Calories eaten against the daily calorie goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieBudget {
    pub goal: f64,
    pub consumed: f64,
}

impl CalorieBudget {
    pub fn new(goal: f64, consumed: f64) -> Self {
        Self { goal, consumed }
    }

    /// Calories left before the goal, never negative
    pub fn remaining(&self) -> f64 {
        (self.goal - self.consumed).max(0.0)
    }

    pub fn is_exceeded(&self) -> bool {
        self.consumed > self.goal
    }

    /// How far intake went past the goal, zero when it did not
    pub fn exceeded_by(&self) -> f64 {
        (self.consumed - self.goal).max(0.0)
    }

    /// Fraction of the goal consumed, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        ratio(self.consumed, self.goal)
    }
}

/// Steps walked against the daily step goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepBudget {
    pub goal: i64,
    pub steps: i64,
}

impl StepBudget {
    pub fn new(goal: i64, steps: i64) -> Self {
        Self { goal, steps }
    }

    pub fn remaining(&self) -> i64 {
        self.goal.saturating_sub(self.steps).max(0)
    }

    pub fn is_reached(&self) -> bool {
        self.steps >= self.goal
    }

    pub fn progress(&self) -> f64 {
        ratio(self.steps as f64, self.goal as f64)
    }
}

/// The calorie and step goals in effect for a user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyGoals {
    pub calories: f64,
    pub steps: i64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: DEFAULT_DAILY_CALORIE_GOAL,
            steps: DEFAULT_DAILY_STEP_GOAL,
        }
    }
}

impl DailyGoals {
    /// Goals from the user's preferences, or the account defaults without any
    pub fn from_preferences(preferences: Option<&Preferences>) -> Self {
        match preferences {
            Some(p) => Self {
                calories: p.calorie_goal(),
                steps: p.daily_step_goal,
            },
            None => Self::default(),
        }
    }
}
