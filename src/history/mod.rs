/// History store: the in-memory workout and weight history
///
/// This module defines the HistoryState aggregate and the HistoryStore that
/// owns it. The store is the only mutation path: appends validate at the
/// boundary, assign ids and timestamps, and write the full state back through
/// the injected repository after every change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    DomainError, IdProvider, UserProfile, WeightRecord, Workout, WorkoutDraft,
};
use crate::storage::{StateRepository, StorageError};

/// Fixed repository key the whole history is stored under
pub const STORAGE_KEY: &str = "fittrack_ai_v1";

/// Body weight (kg) of the seed record created on first launch
const SEED_WEIGHT_KG: f64 = 70.0;

/// Errors that can occur when mutating the history
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Persistence error: {0}")]
    Storage(#[from] StorageError),
}

/// The complete tracked history plus the user profile
///
/// Both sequences are append-only and kept in insertion order, which matches
/// chronological order because timestamps are assigned at append time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    pub workouts: Vec<Workout>,
    #[serde(rename = "weightHistory")]
    pub weight_history: Vec<WeightRecord>,
    #[serde(rename = "userProfile")]
    pub user_profile: UserProfile,
}

impl HistoryState {
    /// The state seeded on first launch: no workouts, one weight record
    /// dated now, and the default profile
    fn seeded(ids: &dyn IdProvider) -> Self {
        let seed = WeightRecord {
            id: ids.next_id(),
            date: chrono::Utc::now(),
            weight: SEED_WEIGHT_KG,
        };

        Self {
            workouts: Vec::new(),
            weight_history: vec![seed],
            user_profile: UserProfile::default(),
        }
    }
}

/// Owner of the history, wired to a repository and an id provider
///
/// There is exactly one store per process; all UI events funnel through it on
/// one logical thread, so appends are strictly ordered and need no locking.
pub struct HistoryStore<R: StateRepository> {
    repo: R,
    ids: Box<dyn IdProvider>,
    state: HistoryState,
}

impl<R: StateRepository> HistoryStore<R> {
    /// Open the store, loading persisted history or seeding a default
    ///
    /// A missing blob seeds a fresh state. A blob that is present but fails
    /// shape validation is treated as corruption: the store falls back to the
    /// same fresh state and logs a warning instead of failing the launch.
    pub fn open(repo: R, ids: Box<dyn IdProvider>) -> Result<Self, StorageError> {
        let state = match repo.get(STORAGE_KEY)? {
            Some(blob) => match serde_json::from_str::<HistoryState>(&blob) {
                Ok(state) => {
                    tracing::info!(
                        "Loaded history: {} workouts, {} weight records",
                        state.workouts.len(),
                        state.weight_history.len()
                    );
                    state
                }
                Err(e) => {
                    tracing::warn!(
                        "Stored history is corrupted, starting from a fresh state: {}",
                        e
                    );
                    HistoryState::seeded(ids.as_ref())
                }
            },
            None => {
                tracing::info!("No stored history found, seeding default state");
                HistoryState::seeded(ids.as_ref())
            }
        };

        Ok(Self { repo, ids, state })
    }

    /// Read access to the full state
    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// Recorded workouts in insertion order
    pub fn workouts(&self) -> &[Workout] {
        &self.state.workouts
    }

    /// Weight measurements in insertion order
    pub fn weight_history(&self) -> &[WeightRecord] {
        &self.state.weight_history
    }

    /// The user profile
    pub fn profile(&self) -> &UserProfile {
        &self.state.user_profile
    }

    /// Validate and append a workout, then persist the full state
    ///
    /// A draft with no exercises (or any invalid exercise or set) is rejected
    /// before any state change.
    pub fn append_workout(&mut self, draft: WorkoutDraft) -> Result<(), HistoryError> {
        let workout = Workout::new(draft, self.ids.as_ref())?;

        tracing::debug!(
            "Appending workout {} ({}, {} exercises)",
            workout.id,
            workout.workout_type,
            workout.exercises.len()
        );

        self.state.workouts.push(workout);
        self.persist()?;
        Ok(())
    }

    /// Validate and append a weight measurement, then persist the full state
    pub fn append_weight(&mut self, weight: f64) -> Result<(), HistoryError> {
        let record = WeightRecord::new(weight, self.ids.as_ref())?;

        tracing::debug!("Appending weight record {} ({} kg)", record.id, record.weight);

        self.state.weight_history.push(record);
        self.persist()?;
        Ok(())
    }

    /// Write the full state to the repository as one blob
    ///
    /// Every append calls this; there are no partial or batched writes.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.state)?;
        self.repo.set(STORAGE_KEY, &blob)
    }

    /// Tear down the store and hand back the repository
    pub fn into_repository(self) -> R {
        self.repo
    }
}
