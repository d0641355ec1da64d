/// Insight pipeline for AI progress analysis
///
/// This module condenses recent history into a bounded digest, composes the
/// analysis prompt, invokes the text-generation client, and reduces success or
/// failure into a single display string. Its lifecycle is a three-state
/// machine: Idle (nothing requested), Pending (one request in flight) and
/// Settled (text ready, either generated or the fallback).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::WorkoutType;
use crate::history::HistoryState;
use crate::llm::TextGenerator;

/// Model identifier used for every analysis request
pub const ANALYSIS_MODEL: &str = "gemini-3-flash-preview";

/// How many recent workouts / weight records the digest may contain
const DIGEST_LIMIT: usize = 5;

/// Message shown when generation fails for any reason
pub const FALLBACK_MESSAGE: &str =
    "Não foi possível gerar a análise no momento. Continue treinando firme!";

/// Guidance shown when analysis is requested with no recorded workouts
pub const NO_WORKOUTS_MESSAGE: &str =
    "Registre alguns treinos primeiro para eu analisar seu progresso!";

/// Lifecycle of the analysis request
///
/// Modeling this as a tagged enum keeps the illegal combination of "busy with
/// text already present" unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightState {
    /// No analysis requested since startup or the last reset
    Idle,
    /// Exactly one generation request is in flight
    Pending,
    /// The request finished; text is the generated insight or the fallback
    Settled { text: String },
}

impl InsightState {
    /// Whether a request is currently in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, InsightState::Pending)
    }

    /// The display text, if the pipeline has settled
    pub fn text(&self) -> Option<&str> {
        match self {
            InsightState::Settled { text } => Some(text),
            _ => None,
        }
    }
}

/// What a trigger request did
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerResult {
    /// No workouts recorded; the guidance message should be shown and the
    /// external service was not contacted
    Refused(&'static str),
    /// A request was already pending, so this trigger was dropped
    Ignored,
    /// The request ran to completion; the settled text is in the state
    Completed,
}

/// A workout reduced to what the analysis prompt needs
#[derive(Debug, Serialize)]
struct WorkoutDigest {
    date: DateTime<Utc>,
    #[serde(rename = "type")]
    workout_type: WorkoutType,
    #[serde(rename = "exercisesCount")]
    exercises_count: usize,
}

/// A weight record reduced to what the analysis prompt needs
#[derive(Debug, Serialize)]
struct WeightDigest {
    date: DateTime<Utc>,
    weight: f64,
}

/// Pipeline owning the analysis lifecycle and the generation client
pub struct InsightPipeline {
    state: InsightState,
    generator: Box<dyn TextGenerator>,
}

impl InsightPipeline {
    /// Create an idle pipeline around a generation client
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self {
            state: InsightState::Idle,
            generator,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> &InsightState {
        &self.state
    }

    /// Request a progress analysis for the given history
    ///
    /// Re-triggers while a request is pending are ignored. With no recorded
    /// workouts the request is refused before any external call. Otherwise the
    /// pipeline goes Pending, waits for the client to resolve (there is no
    /// timeout or cancellation), and settles with the generated text or, on
    /// any failure, the fixed fallback message. Failures never propagate.
    pub async fn analyze(&mut self, history: &HistoryState) -> TriggerResult {
        if self.state.is_busy() {
            tracing::debug!("Analysis already pending, ignoring trigger");
            return TriggerResult::Ignored;
        }

        if history.workouts.is_empty() {
            return TriggerResult::Refused(NO_WORKOUTS_MESSAGE);
        }

        self.state = InsightState::Pending;

        let prompt = compose_prompt(history);
        let text = match self.generator.generate(ANALYSIS_MODEL, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Progress analysis failed: {}", e);
                FALLBACK_MESSAGE.to_string()
            }
        };

        self.state = InsightState::Settled { text };
        TriggerResult::Completed
    }

    /// Discard the settled text so a new analysis can be requested
    pub fn reset(&mut self) {
        if !self.state.is_busy() {
            self.state = InsightState::Idle;
        }
    }
}

/// Compose the analysis prompt from the bounded history digest
///
/// The digest is capped at the last five workouts and five weight records;
/// the full history is never sent.
fn compose_prompt(history: &HistoryState) -> String {
    let workouts: Vec<WorkoutDigest> = last_n(&history.workouts, DIGEST_LIMIT)
        .iter()
        .map(|w| WorkoutDigest {
            date: w.date,
            workout_type: w.workout_type,
            exercises_count: w.exercises.len(),
        })
        .collect();

    let weights: Vec<WeightDigest> = last_n(&history.weight_history, DIGEST_LIMIT)
        .iter()
        .map(|w| WeightDigest {
            date: w.date,
            weight: w.weight,
        })
        .collect();

    let workouts_json = serde_json::to_string(&workouts).unwrap_or_else(|_| "[]".to_string());
    let weights_json = serde_json::to_string(&weights).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Analise o progresso de treino de {name}.\n\
         Últimos 5 treinos: {workouts}\n\
         Histórico de peso recente: {weights}\n\
         \n\
         Por favor, forneça:\n\
         1. Uma breve análise do ritmo atual.\n\
         2. Duas dicas práticas para melhorar os resultados.\n\
         3. Uma mensagem motivacional curta.\n\
         Responda em Português do Brasil. Mantenha um tom profissional e encorajador.",
        name = history.user_profile.name,
        workouts = workouts_json,
        weights = weights_json,
    )
}

/// Trailing slice of at most `n` elements, insertion order preserved
fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
