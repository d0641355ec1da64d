/// Core types used throughout the domain layer
///
/// This module defines the workout activity labels and the identifier
/// generation service used by all entity constructors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of activity labels a workout can be recorded under
///
/// The serialized form uses the display labels so that persisted history
/// written by earlier versions of the client loads unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutType {
    /// Weight training
    #[serde(rename = "Musculação")]
    Strength,
    /// Running and other cardio work
    #[serde(rename = "Corrida / Cardio")]
    Cardio,
    /// Crossfit sessions
    #[serde(rename = "Crossfit")]
    Crossfit,
    /// Yoga and stretching
    #[serde(rename = "Yoga / Alongamento")]
    Mobility,
    /// Ball sports and similar group activities
    #[serde(rename = "Esporte (Futebol, Basquete, etc)")]
    Sport,
}

impl WorkoutType {
    /// Get the display label for this activity type
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "Musculação",
            WorkoutType::Cardio => "Corrida / Cardio",
            WorkoutType::Crossfit => "Crossfit",
            WorkoutType::Mobility => "Yoga / Alongamento",
            WorkoutType::Sport => "Esporte (Futebol, Basquete, etc)",
        }
    }

    /// All activity types, in the order the entry form offers them
    pub fn all() -> &'static [WorkoutType] {
        &[
            WorkoutType::Strength,
            WorkoutType::Cardio,
            WorkoutType::Crossfit,
            WorkoutType::Mobility,
            WorkoutType::Sport,
        ]
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Service that produces unique identifiers for new entities
///
/// All entity constructors take their ids from one injected provider instead of
/// generating them inline. Tests substitute a deterministic implementation.
pub trait IdProvider: Send + Sync {
    /// Produce the next unique identifier
    fn next_id(&self) -> String;
}

/// Default identifier provider backed by random UUIDs
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_type_round_trip() {
        let json = serde_json::to_string(&WorkoutType::Strength).unwrap();
        assert_eq!(json, "\"Musculação\"");

        let parsed: WorkoutType = serde_json::from_str("\"Corrida / Cardio\"").unwrap();
        assert_eq!(parsed, WorkoutType::Cardio);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let result: Result<WorkoutType, _> = serde_json::from_str("\"Natação\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_uuid_provider_produces_unique_ids() {
        let provider = UuidIdProvider;
        let a = provider.next_id();
        let b = provider.next_id();
        assert_ne!(a, b);
    }
}
