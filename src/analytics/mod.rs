/// Analytics engine for dashboard statistics and chart series
///
/// Everything in this module is a pure computation over the current history.
/// The datasets are small (one person's workouts), so results are recomputed
/// from scratch on every call; there is no cache to invalidate.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{WeightRecord, Workout, WorkoutType};

/// How many workouts the exercise-volume chart looks back over
const VOLUME_WINDOW: usize = 7;

/// Headline statistics shown on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of workouts ever recorded
    pub total_workouts: usize,
    /// Most recent weight measurement, or 0 with no measurements
    pub current_weight: f64,
    /// Change since the first measurement; positive means gain
    pub weight_delta: f64,
    /// Workouts per month, averaged over the calendar months of the year so far
    pub monthly_average: f64,
    /// The most recently recorded workout, if any
    pub last_workout: Option<LastWorkout>,
}

/// The date and activity of the most recent workout
#[derive(Debug, Clone, PartialEq)]
pub struct LastWorkout {
    pub date: DateTime<Utc>,
    pub workout_type: WorkoutType,
}

/// One point of a chart series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Day/month label ("dd/mm") of the underlying record
    pub label: String,
    pub value: f64,
}

/// Stateless engine computing dashboard data from the history
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self
    }

    /// Compute the headline statistics
    ///
    /// `now` only feeds the monthly average, whose divisor is the calendar
    /// month number of the current date rather than the span of the data.
    /// That approximation is intentional; do not swap in a data-span divisor.
    pub fn summarize(
        &self,
        workouts: &[Workout],
        weight_history: &[WeightRecord],
        now: DateTime<Utc>,
    ) -> Summary {
        let total_workouts = workouts.len();

        let current_weight = weight_history.last().map_or(0.0, |w| w.weight);

        let weight_delta = match (weight_history.first(), weight_history.last()) {
            (Some(first), Some(last)) if weight_history.len() > 1 => last.weight - first.weight,
            _ => 0.0,
        };

        let monthly_average = total_workouts as f64 / f64::from(now.month().max(1));

        let last_workout = workouts.last().map(|w| LastWorkout {
            date: w.date,
            workout_type: w.workout_type,
        });

        Summary {
            total_workouts,
            current_weight,
            weight_delta,
            monthly_average,
            last_workout,
        }
    }

    /// Weight-over-time series: one point per measurement, stored order
    ///
    /// No resampling and no deduplication; two measurements on the same day
    /// both appear.
    pub fn weight_series(&self, weight_history: &[WeightRecord]) -> Vec<SeriesPoint> {
        weight_history
            .iter()
            .map(|w| SeriesPoint {
                label: day_month_label(w.date),
                value: w.weight,
            })
            .collect()
    }

    /// Exercise-volume series over the trailing workouts
    ///
    /// The window is the last min(7, len) workouts by insertion order, not a
    /// time window. The value is the exercise count of each workout, a coarse
    /// volume proxy.
    pub fn exercise_volume_series(&self, workouts: &[Workout]) -> Vec<SeriesPoint> {
        let start = workouts.len().saturating_sub(VOLUME_WINDOW);
        workouts[start..]
            .iter()
            .map(|w| SeriesPoint {
                label: day_month_label(w.date),
                value: w.exercises.len() as f64,
            })
            .collect()
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a timestamp as the "dd/mm" chart label
fn day_month_label(date: DateTime<Utc>) -> String {
    date.format("%d/%m").to_string()
}
