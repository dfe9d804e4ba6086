//! Chart series for the progress screen

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resources::{HealthReport, PredictionHistory};

/// One point of the weight trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub x: usize,
    pub y: f64,
}

/// Average intake and expenditure for one report period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaloriePoint {
    pub x: usize,
    pub consumed: f64,
    pub burned: f64,
}

/// Headline numbers of the latest weight prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSummary {
    #[serde(default)]
    pub weekly_loss: f64,
    #[serde(default)]
    pub target_weight: f64,
    #[serde(default)]
    pub days_remaining: f64,
}

impl PredictionSummary {
    /// Read a stored `prediction_result`: a JSON object, or a string
    /// holding one. Anything else gives `None`.
    pub fn from_result(result: &Value) -> Option<Self> {
        match result {
            Value::Object(_) => serde_json::from_value(result.clone()).ok(),
            Value::String(raw) => match serde_json::from_str::<Value>(raw).ok()? {
                decoded @ Value::Object(_) => serde_json::from_value(decoded).ok(),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Series for the progress screen
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Weight change per report, in report order starting at x = 1
    pub weight_trend: Vec<TrendPoint>,

    pub calories: Vec<CaloriePoint>,

    /// From the most recent prediction, if it can be read
    pub prediction: Option<PredictionSummary>,
}

impl ProgressReport {
    pub fn build(reports: &[HealthReport], predictions: &[PredictionHistory]) -> Self {
        let weight_trend = reports
            .iter()
            .enumerate()
            .map(|(i, r)| TrendPoint {
                x: i + 1,
                y: r.weight_change,
            })
            .collect();

        let calories = reports
            .iter()
            .enumerate()
            .map(|(i, r)| CaloriePoint {
                x: i + 1,
                consumed: r.average_calories_consumed,
                burned: r.average_calories_burned,
            })
            .collect();

        let prediction = predictions
            .last()
            .and_then(|p| PredictionSummary::from_result(&p.prediction_result));

        Self {
            weight_trend,
            calories,
            prediction,
        }
    }

    /// Sum of the weight changes across all reports
    pub fn total_weight_change(&self) -> f64 {
        self.weight_trend.iter().map(|p| p.y).sum()
    }
}
