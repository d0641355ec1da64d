/// Public library interface for the FitTrack client
///
/// This module exports the tracker facade and the public types used by the
/// interactive front-end and by tests.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod history;
mod analytics;
mod llm;
mod insight;

// Re-export public modules and types
pub use domain::*;
pub use storage::{MemoryRepository, SqliteRepository, StateRepository, StorageError};
pub use history::{HistoryError, HistoryState, HistoryStore, STORAGE_KEY};
pub use analytics::{AnalyticsEngine, LastWorkout, SeriesPoint, Summary};
pub use llm::{GeminiClient, GenerationError, TextGenerator, UnconfiguredGenerator};
pub use insight::{
    InsightPipeline, InsightState, TriggerResult, ANALYSIS_MODEL, FALLBACK_MESSAGE,
    NO_WORKOUTS_MESSAGE,
};

/// Errors that can occur during client operation
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Persistence error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The assembled fitness-tracking client
///
/// Wires the history store, the analytics engine and the insight pipeline
/// together. All state mutation and the single in-flight analysis request go
/// through this one value; there is no shared global state.
pub struct FitTracker<R: StateRepository> {
    store: HistoryStore<R>,
    analytics: AnalyticsEngine,
    insights: InsightPipeline,
}

impl FitTracker<SqliteRepository> {
    /// Open the client against a SQLite database file
    ///
    /// Ids come from the UUID provider and the text-generation client is
    /// built from the `GEMINI_API_KEY` environment variable. A missing key
    /// does not fail startup: analysis requests will settle with the fallback
    /// message instead.
    pub fn open(db_path: PathBuf) -> Result<Self, AppError> {
        tracing::info!("Initializing FitTrack client with database: {:?}", db_path);

        let repo = SqliteRepository::new(db_path)?;

        let generator: Box<dyn TextGenerator> = match GeminiClient::from_env() {
            Ok(client) => Box::new(client),
            Err(e) => {
                tracing::warn!("Progress analysis unavailable: {}", e);
                Box::new(UnconfiguredGenerator)
            }
        };

        Self::with_parts(repo, Box::new(UuidIdProvider), generator)
    }
}

impl<R: StateRepository> FitTracker<R> {
    /// Assemble a client from explicit collaborators
    ///
    /// Tests use this with the in-memory repository, a deterministic id
    /// provider and a fake generator.
    pub fn with_parts(
        repo: R,
        ids: Box<dyn IdProvider>,
        generator: Box<dyn TextGenerator>,
    ) -> Result<Self, AppError> {
        let store = HistoryStore::open(repo, ids)?;

        Ok(Self {
            store,
            analytics: AnalyticsEngine::new(),
            insights: InsightPipeline::new(generator),
        })
    }

    /// Read access to the history store
    pub fn store(&self) -> &HistoryStore<R> {
        &self.store
    }

    /// Headline statistics for the dashboard, recomputed on every call
    pub fn summary(&self) -> Summary {
        self.analytics.summarize(
            self.store.workouts(),
            self.store.weight_history(),
            chrono::Utc::now(),
        )
    }

    /// Weight-over-time chart series
    pub fn weight_series(&self) -> Vec<SeriesPoint> {
        self.analytics.weight_series(self.store.weight_history())
    }

    /// Exercise-volume chart series over the trailing workouts
    pub fn exercise_volume_series(&self) -> Vec<SeriesPoint> {
        self.analytics.exercise_volume_series(self.store.workouts())
    }

    /// Record a workout from the entry form
    pub fn log_workout(&mut self, draft: WorkoutDraft) -> Result<(), HistoryError> {
        self.store.append_workout(draft)
    }

    /// Record a body-weight measurement
    pub fn log_weight(&mut self, weight: f64) -> Result<(), HistoryError> {
        self.store.append_weight(weight)
    }

    /// Request an AI progress analysis over the current history
    pub async fn analyze_progress(&mut self) -> TriggerResult {
        self.insights.analyze(self.store.state()).await
    }

    /// Current state of the insight pipeline
    pub fn insight_state(&self) -> &InsightState {
        self.insights.state()
    }

    /// Discard a settled analysis so a new one can be requested
    pub fn reset_insight(&mut self) {
        self.insights.reset();
    }
}
