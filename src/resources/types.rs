//! Records exchanged with the REST API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::number::{f64_lenient, f64_or_zero, i64_lenient, opt_f64_lenient};

/// Step goal given to new accounts
pub const DEFAULT_DAILY_STEP_GOAL: i64 = 10_000;

/// Calorie goal given to new accounts
pub const DEFAULT_DAILY_CALORIE_GOAL: f64 = 2000.0;

/// Gender as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Convert the gender to its wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
        }
    }

    /// Parse a wire code (`M`, `F` or `O`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            "O" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Measurement system preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

/// User data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub height_cm: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub weight_kg: Option<f64>,
}

/// Registration payload
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// Profile fields that can be updated
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

/// Per-user preferences, one per account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub id: i64,
    pub user: i64,
    #[serde(deserialize_with = "i64_lenient")]
    pub daily_step_goal: i64,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub daily_calorie_goal: Option<f64>,
    #[serde(default)]
    pub preferred_units: Units,
    #[serde(default)]
    pub notifications_enabled: bool,
}

impl Preferences {
    /// The calorie goal, falling back to the account default
    pub fn calorie_goal(&self) -> f64 {
        self.daily_calorie_goal.unwrap_or(DEFAULT_DAILY_CALORIE_GOAL)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPreferences {
    pub user: i64,
    pub daily_step_goal: i64,
    pub daily_calorie_goal: f64,
    pub preferred_units: Units,
    pub notifications_enabled: bool,
}

impl NewPreferences {
    /// The preferences every new account starts with
    pub fn defaults_for(user: i64) -> Self {
        Self {
            user,
            daily_step_goal: DEFAULT_DAILY_STEP_GOAL,
            daily_calorie_goal: DEFAULT_DAILY_CALORIE_GOAL,
            preferred_units: Units::Metric,
            notifications_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PreferencesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_step_goal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_units: Option<Units>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
}

/// A logged eating event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub user: i64,
    pub meal_type: String,
    #[serde(default)]
    pub food_items: String,
    #[serde(deserialize_with = "f64_lenient")]
    pub calories: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub protein: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub fat: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMeal {
    pub user: i64,
    pub meal_type: String,
    pub food_items: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MealPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

/// A logged exercise session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub user: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "i64_lenient")]
    pub duration_minutes: i64,
    #[serde(deserialize_with = "f64_lenient")]
    pub calories_burned: f64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewWorkout {
    pub user: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration_minutes: i64,
    pub calories_burned: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkoutPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
}

/// Steps counted on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub id: i64,
    pub user: i64,
    #[serde(deserialize_with = "i64_lenient")]
    pub steps: i64,
    #[serde(default)]
    pub recorded_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStepRecord {
    pub user: i64,
    pub steps: i64,
    pub recorded_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StepRecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
}

/// A user-defined target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user: i64,
    pub goal_type: String,
    #[serde(deserialize_with = "f64_lenient")]
    pub target_value: f64,
    #[serde(deserialize_with = "f64_lenient")]
    pub current_value: f64,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    pub user: i64,
    pub goal_type: String,
    pub target_value: f64,
    pub current_value: f64,
    pub deadline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

/// Server-computed summary over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub id: i64,
    pub user: i64,
    pub period_start: String,
    pub period_end: String,
    #[serde(deserialize_with = "f64_lenient")]
    pub average_calories_consumed: f64,
    #[serde(deserialize_with = "f64_lenient")]
    pub average_calories_burned: f64,
    #[serde(deserialize_with = "f64_lenient")]
    pub weight_change: f64,
    #[serde(default)]
    pub summary_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewHealthReport {
    pub user: i64,
    pub period_start: String,
    pub period_end: String,
    pub average_calories_consumed: f64,
    pub average_calories_burned: f64,
    pub weight_change: f64,
    pub summary_text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_calories_consumed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_calories_burned: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user: i64,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub user: i64,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

/// A stored model prediction. `prediction_result` is either a JSON object or
/// a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionHistory {
    pub id: i64,
    pub user: i64,
    pub prediction_type: String,
    #[serde(default)]
    pub input_data: Value,
    #[serde(default)]
    pub prediction_result: Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPrediction {
    pub user: i64,
    pub prediction_type: String,
    pub input_data: Value,
    pub prediction_result: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_result: Option<String>,
}

/// Records that belong to a single user
pub trait Owned {
    fn owner(&self) -> i64;
}

macro_rules! impl_owned {
    ($($ty:ty),* $(,)?) => {
        $(impl Owned for $ty {
            fn owner(&self) -> i64 {
                self.user
            }
        })*
    };
}

impl_owned!(Preferences, Meal, Workout, StepRecord, Goal, HealthReport, Notification, PredictionHistory);

impl Owned for User {
    fn owner(&self) -> i64 {
        self.id
    }
}
