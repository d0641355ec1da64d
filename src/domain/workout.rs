/// Workout entity and related functionality
///
/// This module defines the Workout struct together with its nested Exercise
/// and SetRecord entities, the draft types filled in by the entry form, and
/// the validation applied before anything reaches the history.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, IdProvider, WorkoutType};

/// A single set performed within an exercise
///
/// Sets are immutable once the workout is persisted; edits during entry
/// replace the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Unique identifier for this set
    pub id: String,
    /// Repetitions performed (always at least one)
    pub reps: u32,
    /// Load in kilograms (zero for bodyweight work)
    pub weight: f64,
}

impl SetRecord {
    /// Create a new set with validation
    pub fn new(reps: u32, weight: f64, ids: &dyn IdProvider) -> Result<Self, DomainError> {
        Self::validate_reps(reps)?;
        Self::validate_weight(weight)?;

        Ok(Self {
            id: ids.next_id(),
            reps,
            weight,
        })
    }

    /// Validate that the set has at least one repetition
    fn validate_reps(reps: u32) -> Result<(), DomainError> {
        if reps == 0 {
            return Err(DomainError::InvalidSet(
                "Set must have at least one repetition".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate that the load is a usable number
    fn validate_weight(weight: f64) -> Result<(), DomainError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(DomainError::InvalidSet(format!(
                "Set weight must be a non-negative number, got {}",
                weight
            )));
        }
        Ok(())
    }
}

/// An exercise performed during a workout, with its sets in performance order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier for this exercise
    pub id: String,
    /// Display name (e.g., "Supino reto", "Agachamento")
    pub name: String,
    /// Sets in the order they were performed (never empty once persisted)
    pub sets: Vec<SetRecord>,
}

impl Exercise {
    /// Create a new exercise from a draft with validation
    ///
    /// An exercise with zero sets is a transient entry-form state only; it is
    /// rejected here before it can reach the history.
    pub fn new(draft: ExerciseDraft, ids: &dyn IdProvider) -> Result<Self, DomainError> {
        Self::validate_name(&draft.name)?;

        if draft.sets.is_empty() {
            return Err(DomainError::EmptyExercise);
        }

        let sets = draft
            .sets
            .into_iter()
            .map(|s| SetRecord::new(s.reps, s.weight, ids))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: ids.next_id(),
            name: draft.name.trim().to_string(),
            sets,
        })
    }

    /// Validate the exercise name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidExerciseName(
                "Exercise name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidExerciseName(
                "Exercise name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }
}

/// A recorded training session
///
/// This is the central entity of the history. The creation timestamp is
/// assigned when the workout is appended and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier for this workout
    pub id: String,
    /// When the workout was recorded
    pub date: DateTime<Utc>,
    /// Which kind of activity this session was
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    /// Exercises in performance order (never empty once persisted)
    pub exercises: Vec<Exercise>,
    /// Free-form notes about the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Session length in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Workout {
    /// Create a new workout from a draft with validation
    ///
    /// This is the only way a workout enters the system. It rejects drafts
    /// with no exercises and validates every nested exercise and set before
    /// assigning identifiers and the creation timestamp.
    pub fn new(draft: WorkoutDraft, ids: &dyn IdProvider) -> Result<Self, DomainError> {
        if draft.exercises.is_empty() {
            return Err(DomainError::EmptyWorkout);
        }

        Self::validate_notes(&draft.notes)?;

        let exercises = draft
            .exercises
            .into_iter()
            .map(|e| Exercise::new(e, ids))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: ids.next_id(),
            date: Utc::now(),
            workout_type: draft.workout_type,
            exercises,
            notes: draft.notes,
            duration: draft.duration,
        })
    }

    /// Total number of sets across all exercises
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Validate the optional notes field
    fn validate_notes(notes: &Option<String>) -> Result<(), DomainError> {
        if let Some(text) = notes {
            if text.len() > 500 {
                return Err(DomainError::Validation {
                    message: "Notes cannot be longer than 500 characters".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A set as captured by the entry form, before ids are assigned
#[derive(Debug, Clone)]
pub struct SetDraft {
    pub reps: u32,
    pub weight: f64,
}

/// An exercise as captured by the entry form, before ids are assigned
#[derive(Debug, Clone)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: Vec<SetDraft>,
}

/// A workout as captured by the entry form, before ids and timestamp exist
#[derive(Debug, Clone)]
pub struct WorkoutDraft {
    pub workout_type: WorkoutType,
    pub exercises: Vec<ExerciseDraft>,
    pub notes: Option<String>,
    pub duration: Option<u32>,
}

impl WorkoutDraft {
    /// Convenience constructor for a draft without notes or duration
    pub fn new(workout_type: WorkoutType, exercises: Vec<ExerciseDraft>) -> Self {
        Self {
            workout_type,
            exercises,
            notes: None,
            duration: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UuidIdProvider;

    fn bench_press_draft() -> ExerciseDraft {
        ExerciseDraft {
            name: "Supino reto".to_string(),
            sets: vec![
                SetDraft { reps: 10, weight: 60.0 },
                SetDraft { reps: 8, weight: 65.0 },
            ],
        }
    }

    #[test]
    fn test_create_valid_workout() {
        let ids = UuidIdProvider;
        let draft = WorkoutDraft::new(WorkoutType::Strength, vec![bench_press_draft()]);

        let workout = Workout::new(draft, &ids).unwrap();
        assert_eq!(workout.workout_type, WorkoutType::Strength);
        assert_eq!(workout.exercises.len(), 1);
        assert_eq!(workout.set_count(), 2);
        assert!(!workout.id.is_empty());
    }

    #[test]
    fn test_workout_without_exercises_rejected() {
        let ids = UuidIdProvider;
        let draft = WorkoutDraft::new(WorkoutType::Cardio, vec![]);

        let result = Workout::new(draft, &ids);
        assert!(matches!(result, Err(DomainError::EmptyWorkout)));
    }

    #[test]
    fn test_exercise_without_sets_rejected() {
        let ids = UuidIdProvider;
        let draft = WorkoutDraft::new(
            WorkoutType::Strength,
            vec![ExerciseDraft {
                name: "Remada curvada".to_string(),
                sets: vec![],
            }],
        );

        let result = Workout::new(draft, &ids);
        assert!(matches!(result, Err(DomainError::EmptyExercise)));
    }

    #[test]
    fn test_empty_exercise_name_rejected() {
        let ids = UuidIdProvider;
        let draft = WorkoutDraft::new(
            WorkoutType::Strength,
            vec![ExerciseDraft {
                name: "   ".to_string(),
                sets: vec![SetDraft { reps: 10, weight: 0.0 }],
            }],
        );

        assert!(Workout::new(draft, &ids).is_err());
    }

    #[test]
    fn test_zero_rep_set_rejected() {
        let ids = UuidIdProvider;
        let result = SetRecord::new(0, 50.0, &ids);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_set_weight_rejected() {
        let ids = UuidIdProvider;
        assert!(SetRecord::new(10, f64::NAN, &ids).is_err());
        assert!(SetRecord::new(10, f64::INFINITY, &ids).is_err());
        assert!(SetRecord::new(10, -5.0, &ids).is_err());
    }

    #[test]
    fn test_workout_serializes_with_stable_field_names() {
        let ids = UuidIdProvider;
        let draft = WorkoutDraft::new(WorkoutType::Strength, vec![bench_press_draft()]);
        let workout = Workout::new(draft, &ids).unwrap();

        let json = serde_json::to_value(&workout).unwrap();
        assert_eq!(json["type"], "Musculação");
        assert!(json.get("notes").is_none());
        assert!(json["exercises"][0]["sets"][0].get("reps").is_some());
    }
}
