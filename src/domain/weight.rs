/// WeightRecord entity for tracking body-weight measurements
///
/// This module defines the WeightRecord struct that represents a single
/// body-weight measurement taken at a point in time.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, IdProvider};

/// A single body-weight measurement
///
/// Records are append-only: each new measurement becomes the current weight
/// and the full sequence feeds the weight-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    /// Unique identifier for this measurement
    pub id: String,
    /// When the measurement was recorded
    pub date: DateTime<Utc>,
    /// Body weight in kilograms
    pub weight: f64,
}

impl WeightRecord {
    /// Create a new weight record with validation
    ///
    /// The timestamp is set to the current time; measurements are always
    /// recorded for "now".
    pub fn new(weight: f64, ids: &dyn IdProvider) -> Result<Self, DomainError> {
        Self::validate_weight(weight)?;

        Ok(Self {
            id: ids.next_id(),
            date: Utc::now(),
            weight,
        })
    }

    /// Validate that the measurement is a usable positive number
    ///
    /// Non-numeric form input surfaces here as NaN and is rejected before any
    /// state change.
    fn validate_weight(weight: f64) -> Result<(), DomainError> {
        if !weight.is_finite() {
            return Err(DomainError::InvalidWeight(
                "Weight must be a number".to_string(),
            ));
        }
        if weight <= 0.0 {
            return Err(DomainError::InvalidWeight(format!(
                "Weight must be positive, got {}",
                weight
            )));
        }
        Ok(())
    }
}
