/// UserProfile entity
///
/// The profile is a small free-form record; it has no invariants beyond being
/// present, so it carries no validation of its own.

use serde::{Deserialize, Serialize};

/// The user's profile as shown on the dashboard and embedded in prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, used in greetings and in the analysis prompt
    pub name: String,
    /// Free-text training goal
    pub goal: String,
    /// Height in centimeters
    pub height: u32,
}

impl Default for UserProfile {
    /// The profile seeded on first launch, before the user edits anything
    fn default() -> Self {
        Self {
            name: "Atleta".to_string(),
            goal: "Saúde".to_string(),
            height: 175,
        }
    }
}
