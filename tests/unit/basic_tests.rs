/// Basic unit tests to verify core functionality
use fittrack::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn push_day_draft() -> WorkoutDraft {
        WorkoutDraft::new(
            WorkoutType::Strength,
            vec![ExerciseDraft {
                name: "Supino reto".to_string(),
                sets: vec![SetDraft { reps: 10, weight: 60.0 }],
            }],
        )
    }

    #[test]
    fn test_workout_creation() {
        let ids = UuidIdProvider;
        let workout = Workout::new(push_day_draft(), &ids);

        assert!(workout.is_ok());
        let workout = workout.unwrap();
        assert_eq!(workout.workout_type, WorkoutType::Strength);
        assert_eq!(workout.exercises.len(), 1);
    }

    #[test]
    fn test_empty_workout_rejected() {
        let ids = UuidIdProvider;
        let draft = WorkoutDraft::new(WorkoutType::Crossfit, vec![]);
        assert!(Workout::new(draft, &ids).is_err());
    }

    #[test]
    fn test_weight_record_validation() {
        let ids = UuidIdProvider;
        assert!(WeightRecord::new(82.3, &ids).is_ok());
        assert!(WeightRecord::new(f64::NAN, &ids).is_err());
        assert!(WeightRecord::new(0.0, &ids).is_err());
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteRepository::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());
    }

    #[test]
    fn test_analytics_engine_summary_counts() {
        let engine = AnalyticsEngine::new();
        let ids = UuidIdProvider;
        let workouts: Vec<Workout> = (0..3)
            .map(|_| Workout::new(push_day_draft(), &ids).unwrap())
            .collect();

        let summary = engine.summarize(&workouts, &[], chrono::Utc::now());
        assert_eq!(summary.total_workouts, 3);
        assert_eq!(summary.current_weight, 0.0);
        assert_eq!(summary.weight_delta, 0.0);
    }

    #[test]
    fn test_history_store_with_memory_repository() {
        let mut store =
            HistoryStore::open(MemoryRepository::new(), Box::new(UuidIdProvider)).unwrap();

        store.append_workout(push_day_draft()).unwrap();
        store.append_weight(74.0).unwrap();

        assert_eq!(store.workouts().len(), 1);
        assert_eq!(store.weight_history().len(), 2); // seed + appended
    }
}
