//! Goal progress

use crate::resources::{Goal, GoalPatch};

/// `current / target` as a percentage; zero when the target is not positive
pub fn goal_progress(current: f64, target: f64) -> f64 {
    if target > 0.0 {
        current / target * 100.0
    } else {
        0.0
    }
}

impl Goal {
    /// Progress towards the target in percent. May exceed 100.
    pub fn progress_percent(&self) -> f64 {
        goal_progress(self.current_value, self.target_value)
    }

    /// Progress for a progress bar, capped at 100
    pub fn progress_bar_percent(&self) -> f64 {
        self.progress_percent().clamp(0.0, 100.0)
    }

    /// The patch that flips this goal's completion flag
    pub fn toggled(&self) -> GoalPatch {
        GoalPatch {
            is_completed: Some(!self.is_completed),
            ..Default::default()
        }
    }
}

/// Split goals into open and completed ones, keeping their order
pub fn partition_goals(goals: Vec<Goal>) -> (Vec<Goal>, Vec<Goal>) {
    goals.into_iter().partition(|g| !g.is_completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(current_value: f64, target_value: f64, is_completed: bool) -> Goal {
        Goal {
            id: 1,
            user: 1,
            goal_type: "weight".to_string(),
            target_value,
            current_value,
            deadline: Some("2024-12-31".to_string()),
            is_completed,
        }
    }

    #[test]
    fn progress() {
        assert_eq!(goal_progress(5.0, 10.0), 50.0);
        assert_eq!(goal_progress(5.0, 0.0), 0.0);
        assert_eq!(goal_progress(5.0, -2.0), 0.0);

        let over = goal(15.0, 10.0, false);
        assert_eq!(over.progress_percent(), 150.0);
        assert_eq!(over.progress_bar_percent(), 100.0);
    }

    #[test]
    fn toggling_flips_completion() {
        assert_eq!(goal(1.0, 2.0, false).toggled().is_completed, Some(true));
        assert_eq!(goal(1.0, 2.0, true).toggled().is_completed, Some(false));
        assert!(goal(1.0, 2.0, true).toggled().target_value.is_none());
    }

    #[test]
    fn partition() {
        let (open, done) = partition_goals(vec![
            goal(1.0, 2.0, false),
            goal(2.0, 2.0, true),
            goal(0.0, 2.0, false),
        ]);
        assert_eq!(open.len(), 2);
        assert_eq!(done.len(), 1);
    }
}
