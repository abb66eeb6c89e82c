//! Categories and their weighted options.
//!
//! DESIGN
//! ======
//! Only the user-entered fields are stored. Totals and percentages are
//! recomputed on every read so they can never drift from the option list.
//! Option order is significant: it fixes the segment layout on the wheel.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::consts::{MIN_OPTION_WEIGHT, MIN_SPIN_OPTIONS};

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("option name must not be blank")]
    EmptyName,
}

// =============================================================================
// OPTION
// =============================================================================

/// One weighted choice on a wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelOption {
    pub id: Uuid,
    pub name: String,
    /// Relative likelihood. Probability is `weight / total_weight`.
    pub weight: u32,
}

impl WheelOption {
    /// Build an option with a fresh id.
    ///
    /// The name is trimmed and must not end up empty. A weight below
    /// [`MIN_OPTION_WEIGHT`] is clamped up to it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] for a blank name.
    pub fn new(name: impl Into<String>, weight: u32) -> Result<Self, ModelError> {
        let name = validate_name(name.into())?;
        Ok(Self { id: Uuid::new_v4(), name, weight: weight.max(MIN_OPTION_WEIGHT) })
    }

    /// Rename in place, with the same rules as [`WheelOption::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] for a blank name and keeps the old one.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    pub fn set_weight(&mut self, weight: u32) {
        self.weight = weight.max(MIN_OPTION_WEIGHT);
    }

    /// Share of the wheel in percent, or 0 when `total_weight` is 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, total_weight: u64) -> f64 {
        if total_weight == 0 {
            return 0.0;
        }
        f64::from(self.weight) / total_weight as f64 * 100.0
    }
}

fn validate_name(name: String) -> Result<String, ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::EmptyName);
    }
    if trimmed.len() == name.len() {
        Ok(name)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Sum of weights, widened so long option lists cannot overflow.
#[must_use]
pub fn total_weight(options: &[WheelOption]) -> u64 {
    options.iter().map(|o| u64::from(o.weight)).sum()
}

// =============================================================================
// CATEGORY
// =============================================================================

/// A named wheel: the ordered options a user spins among.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub options: Vec<WheelOption>,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, options: Vec<WheelOption>) -> Self {
        // Persisted as whole seconds; truncate now so reloads compare equal.
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            options,
            created_at: now.replace_nanosecond(0).unwrap_or(now),
        }
    }

    #[must_use]
    pub fn total_weight(&self) -> u64 {
        total_weight(&self.options)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Percentage for the option with `option_id`, if it belongs here.
    #[must_use]
    pub fn percentage_of(&self, option_id: Uuid) -> Option<f64> {
        let total = self.total_weight();
        self.options
            .iter()
            .find(|o| o.id == option_id)
            .map(|o| o.percentage(total))
    }

    /// Whether the wheel has enough weighted options to spin.
    #[must_use]
    pub fn is_spinnable(&self) -> bool {
        self.options.len() >= MIN_SPIN_OPTIONS && self.total_weight() > 0
    }
}
