//! Converting a stopwatch session into a workout

use std::time::Duration;

use crate::resources::NewWorkout;

/// Calories credited per whole minute of a timed workout
pub const CALORIES_PER_MINUTE: f64 = 8.0;

/// Kind given to timed workouts when none is chosen
pub const DEFAULT_WORKOUT_KIND: &str = "Treino";

/// A finished stopwatch session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedWorkout {
    pub elapsed_seconds: u64,
}

impl TimedWorkout {
    pub fn from_elapsed(elapsed_seconds: u64) -> Self {
        Self { elapsed_seconds }
    }

    pub fn from_duration(elapsed: Duration) -> Self {
        Self::from_elapsed(elapsed.as_secs())
    }

    /// Whole minutes elapsed
    pub fn minutes(&self) -> i64 {
        (self.elapsed_seconds / 60) as i64
    }

    /// Estimated calories burned, rounded
    pub fn calories(&self) -> f64 {
        (self.minutes() as f64 * CALORIES_PER_MINUTE).round()
    }

    /// `MM:SS` clock display
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_seconds / 60, self.elapsed_seconds % 60)
    }

    /// The create payload for this session. A blank kind becomes
    /// [`DEFAULT_WORKOUT_KIND`].
    pub fn to_new_workout(&self, user: i64, kind: Option<&str>) -> NewWorkout {
        let kind = kind
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_WORKOUT_KIND);

        NewWorkout {
            user,
            kind: kind.to_string(),
            duration_minutes: self.minutes(),
            calories_burned: self.calories(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_minutes_five_seconds() {
        let timed = TimedWorkout::from_elapsed(125);
        assert_eq!(timed.minutes(), 2);
        assert_eq!(timed.calories(), 16.0);
        assert_eq!(timed.display(), "02:05");
    }

    #[test]
    fn under_a_minute_counts_nothing() {
        let timed = TimedWorkout::from_elapsed(59);
        assert_eq!(timed.minutes(), 0);
        assert_eq!(timed.calories(), 0.0);
        assert_eq!(timed.display(), "00:59");
    }

    #[test]
    fn long_sessions_keep_counting_minutes() {
        let timed = TimedWorkout::from_duration(Duration::from_secs(3725));
        assert_eq!(timed.minutes(), 62);
        assert_eq!(timed.display(), "62:05");
    }

    #[test]
    fn new_workout_payload() {
        let timed = TimedWorkout::from_elapsed(1800);
        let workout = timed.to_new_workout(4, None);
        assert_eq!(workout.kind, "Treino");
        assert_eq!(workout.duration_minutes, 30);
        assert_eq!(workout.calories_burned, 240.0);

        assert_eq!(timed.to_new_workout(4, Some("  ")).kind, "Treino");
        assert_eq!(timed.to_new_workout(4, Some("Yoga")).kind, "Yoga");
    }
}
