/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Workout, Exercise, SetRecord,
/// WeightRecord, UserProfile) and their validation rules. These types represent
/// the fundamental concepts in our fitness tracking system.

pub mod workout;
pub mod weight;
pub mod profile;
pub mod types;

// Re-export public types for easy access
pub use workout::*;
pub use weight::*;
pub use profile::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid exercise name: {0}")]
    InvalidExerciseName(String),

    #[error("Invalid set: {0}")]
    InvalidSet(String),

    #[error("Invalid weight value: {0}")]
    InvalidWeight(String),

    #[error("Workout must contain at least one exercise")]
    EmptyWorkout,

    #[error("Exercise must contain at least one set")]
    EmptyExercise,
}
