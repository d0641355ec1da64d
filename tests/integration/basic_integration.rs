/// Basic integration tests covering the assembled client
use fittrack::*;
use tempfile::NamedTempFile;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

/// Deterministic id provider for repeatable assertions
struct SequentialIdProvider {
    counter: AtomicUsize,
}

impl SequentialIdProvider {
    fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("id-{}", n)
    }
}

/// Generator that counts calls and replies with a fixed text
struct CannedGenerator {
    reply: &'static str,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, model: &str, _prompt: &str) -> Result<String, GenerationError> {
        assert_eq!(model, ANALYSIS_MODEL);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.to_string())
    }
}

/// Generator that always fails
struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Api {
            status: 500,
            message: "boom".to_string(),
        })
    }
}

fn leg_day() -> WorkoutDraft {
    WorkoutDraft::new(
        WorkoutType::Strength,
        vec![
            ExerciseDraft {
                name: "Agachamento".to_string(),
                sets: vec![
                    SetDraft { reps: 8, weight: 80.0 },
                    SetDraft { reps: 8, weight: 85.0 },
                ],
            },
            ExerciseDraft {
                name: "Leg press".to_string(),
                sets: vec![SetDraft { reps: 12, weight: 160.0 }],
            },
        ],
    )
}

fn memory_app(generator: Box<dyn TextGenerator>) -> FitTracker<MemoryRepository> {
    FitTracker::with_parts(
        MemoryRepository::new(),
        Box::new(SequentialIdProvider::new()),
        generator,
    )
    .expect("Failed to assemble client")
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[test]
    fn test_fresh_client_is_seeded() {
        let app = memory_app(Box::new(UnconfiguredGenerator));

        let summary = app.summary();
        assert_eq!(summary.total_workouts, 0);
        assert_eq!(summary.current_weight, 70.0); // seed weight record
        assert_eq!(summary.weight_delta, 0.0);
        assert!(summary.last_workout.is_none());
        assert_eq!(*app.insight_state(), InsightState::Idle);
    }

    #[test]
    fn test_logging_workouts_and_weights_updates_summary() {
        let mut app = memory_app(Box::new(UnconfiguredGenerator));

        app.log_workout(leg_day()).unwrap();
        app.log_weight(71.5).unwrap();
        app.log_weight(72.0).unwrap();

        let summary = app.summary();
        assert_eq!(summary.total_workouts, 1);
        assert_eq!(summary.current_weight, 72.0);
        assert!((summary.weight_delta - 2.0).abs() < 1e-9); // 72.0 - 70.0 seed

        assert_eq!(app.weight_series().len(), 3);
        assert_eq!(app.exercise_volume_series().len(), 1);
        assert_eq!(app.exercise_volume_series()[0].value, 2.0);
    }

    #[test]
    fn test_invalid_appends_are_rejected_and_leave_no_trace() {
        let mut app = memory_app(Box::new(UnconfiguredGenerator));

        assert!(app.log_workout(WorkoutDraft::new(WorkoutType::Cardio, vec![])).is_err());
        assert!(app.log_weight(f64::NAN).is_err());

        let summary = app.summary();
        assert_eq!(summary.total_workouts, 0);
        assert_eq!(app.weight_series().len(), 1);
    }

    #[test]
    fn test_database_persistence_round_trip() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        {
            let repo = SqliteRepository::new(db_path.clone()).unwrap();
            let mut app = FitTracker::with_parts(
                repo,
                Box::new(SequentialIdProvider::new()),
                Box::new(UnconfiguredGenerator),
            )
            .unwrap();

            app.log_workout(leg_day()).unwrap();
            app.log_weight(73.2).unwrap();
        }

        // A second client on the same database sees the identical history
        let repo = SqliteRepository::new(db_path).unwrap();
        let app = FitTracker::with_parts(
            repo,
            Box::new(SequentialIdProvider::new()),
            Box::new(UnconfiguredGenerator),
        )
        .unwrap();

        let summary = app.summary();
        assert_eq!(summary.total_workouts, 1);
        assert_eq!(summary.current_weight, 73.2);
        assert_eq!(app.store().workouts()[0].exercises.len(), 2);
    }

    #[tokio::test]
    async fn test_analysis_refused_with_no_workouts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = memory_app(Box::new(CannedGenerator {
            reply: "não deveria rodar",
            calls: calls.clone(),
        }));

        let result = app.analyze_progress().await;
        assert_eq!(result, TriggerResult::Refused(NO_WORKOUTS_MESSAGE));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(*app.insight_state(), InsightState::Idle);
    }

    #[tokio::test]
    async fn test_analysis_success_settles_with_generated_text() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = memory_app(Box::new(CannedGenerator {
            reply: "Seu ritmo está ótimo.",
            calls: calls.clone(),
        }));

        app.log_workout(leg_day()).unwrap();
        let result = app.analyze_progress().await;

        assert_eq!(result, TriggerResult::Completed);
        assert_eq!(app.insight_state().text(), Some("Seu ritmo está ótimo."));
        assert!(!app.insight_state().is_busy());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analysis_failure_settles_with_fallback() {
        let mut app = memory_app(Box::new(FailingGenerator));

        app.log_workout(leg_day()).unwrap();
        let result = app.analyze_progress().await;

        assert_eq!(result, TriggerResult::Completed);
        assert!(!app.insight_state().is_busy());
        assert_eq!(app.insight_state().text(), Some(FALLBACK_MESSAGE));
    }

    #[tokio::test]
    async fn test_reset_allows_a_new_analysis() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut app = memory_app(Box::new(CannedGenerator {
            reply: "análise",
            calls: calls.clone(),
        }));

        app.log_workout(leg_day()).unwrap();
        app.analyze_progress().await;
        app.reset_insight();
        assert_eq!(*app.insight_state(), InsightState::Idle);

        app.analyze_progress().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
