//! Parsing of user-entered form values.
//!
//! Every numeric field is checked: text that is not a finite, non-negative
//! number is rejected with [`Error::Validation`] naming the field.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Error, Result};
use crate::resources::{Gender, NewGoal, NewMeal, NewUser, NewWorkout, UserPatch};

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Trimmed, non-empty text
pub fn require_text(field: &str, input: &str) -> Result<String> {
    let value = input.trim();
    if value.is_empty() {
        return Err(Error::validation(field, "is required"));
    }
    Ok(value.to_string())
}

pub fn validate_email(input: &str) -> Result<String> {
    let email = require_text("email", input)?;
    if !email_regex().is_match(&email) {
        return Err(Error::validation("email", "is not a valid address"));
    }
    Ok(email)
}

/// A whole, non-negative number
pub fn parse_count(field: &str, input: &str) -> Result<i64> {
    let value = require_text(field, input)?;
    let count: i64 = value
        .parse()
        .map_err(|_| Error::validation(field, format!("{:?} is not a whole number", value)))?;
    if count < 0 {
        return Err(Error::validation(field, "cannot be negative"));
    }
    Ok(count)
}

/// A finite, non-negative number. Accepts `,` as the decimal separator.
pub fn parse_measure(field: &str, input: &str) -> Result<f64> {
    let value = require_text(field, input)?;
    let measure: f64 = value
        .replace(',', ".")
        .parse()
        .map_err(|_| Error::validation(field, format!("{:?} is not a number", value)))?;
    if !measure.is_finite() {
        return Err(Error::validation(field, "must be a finite number"));
    }
    if measure < 0.0 {
        return Err(Error::validation(field, "cannot be negative"));
    }
    Ok(measure)
}

fn parse_optional_measure(field: &str, input: &str) -> Result<Option<f64>> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_measure(field, input).map(Some)
    }
}

/// Step count entered for a day
pub fn parse_steps(input: &str) -> Result<i64> {
    parse_count("steps", input)
}

/// A calendar date in `YYYY-MM-DD` form
pub fn parse_date(field: &str, input: &str) -> Result<String> {
    let value = require_text(field, input)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| Error::validation(field, "must be a date in YYYY-MM-DD form"))?;
    Ok(value)
}

pub fn parse_gender(input: &str) -> Result<Gender> {
    Gender::from_code(input).ok_or_else(|| Error::validation("gender", "must be M, F or O"))
}

/// Sign-up form
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
    pub gender: String,
    pub height_cm: String,
    pub weight_kg: String,
}

impl RegistrationForm {
    pub fn into_new_user(self) -> Result<NewUser> {
        let name = require_text("name", &self.name)?;
        let email = validate_email(&self.email)?;
        // passwords are sent as typed, surrounding spaces included
        if self.password.is_empty() {
            return Err(Error::validation("password", "is required"));
        }

        Ok(NewUser {
            name,
            email,
            password: self.password,
            birth_date: parse_date("birth_date", &self.birth_date)?,
            gender: parse_gender(&self.gender)?,
            height_cm: parse_measure("height_cm", &self.height_cm)?,
            weight_kg: parse_measure("weight_kg", &self.weight_kg)?,
        })
    }
}

/// Profile edit form. Blank optional fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub birth_date: String,
    pub gender: String,
    pub height_cm: String,
    pub weight_kg: String,
}

impl ProfileForm {
    pub fn into_patch(self) -> Result<UserPatch> {
        let birth_date = if self.birth_date.trim().is_empty() {
            None
        } else {
            Some(parse_date("birth_date", &self.birth_date)?)
        };
        let gender = if self.gender.trim().is_empty() {
            None
        } else {
            Some(parse_gender(&self.gender)?)
        };

        Ok(UserPatch {
            name: Some(require_text("name", &self.name)?),
            email: Some(validate_email(&self.email)?),
            birth_date,
            gender,
            height_cm: parse_optional_measure("height_cm", &self.height_cm)?,
            weight_kg: parse_optional_measure("weight_kg", &self.weight_kg)?,
        })
    }
}

/// Meal entry form. Blank macros count as zero.
#[derive(Debug, Clone, Default)]
pub struct MealForm {
    pub meal_type: String,
    pub food_items: String,
    pub calories: String,
    pub carbs: String,
    pub protein: String,
    pub fat: String,
}

impl MealForm {
    pub fn into_new_meal(self, user: i64) -> Result<NewMeal> {
        Ok(NewMeal {
            user,
            meal_type: require_text("meal_type", &self.meal_type)?,
            food_items: self.food_items.trim().to_string(),
            calories: parse_measure("calories", &self.calories)?,
            carbs: parse_optional_measure("carbs", &self.carbs)?.unwrap_or(0.0),
            protein: parse_optional_measure("protein", &self.protein)?.unwrap_or(0.0),
            fat: parse_optional_measure("fat", &self.fat)?.unwrap_or(0.0),
        })
    }
}

/// Workout entry form
#[derive(Debug, Clone, Default)]
pub struct WorkoutForm {
    pub kind: String,
    pub duration_minutes: String,
    pub calories_burned: String,
}

impl WorkoutForm {
    pub fn into_new_workout(self, user: i64) -> Result<NewWorkout> {
        Ok(NewWorkout {
            user,
            kind: require_text("type", &self.kind)?,
            duration_minutes: parse_count("duration_minutes", &self.duration_minutes)?,
            calories_burned: parse_measure("calories_burned", &self.calories_burned)?,
        })
    }
}

/// Goal entry form
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub goal_type: String,
    pub target_value: String,
    pub current_value: String,
    pub deadline: String,
}

impl GoalForm {
    pub fn into_new_goal(self, user: i64) -> Result<NewGoal> {
        let current_value = parse_optional_measure("current_value", &self.current_value)?;
        Ok(NewGoal {
            user,
            goal_type: require_text("goal_type", &self.goal_type)?,
            target_value: parse_measure("target_value", &self.target_value)?,
            current_value: current_value.unwrap_or(0.0),
            deadline: parse_date("deadline", &self.deadline)?,
            is_completed: Some(false),
        })
    }
}
