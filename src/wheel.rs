//! Spin state machine for one wheel.
//!
//! DESIGN
//! ======
//! A spin is split into two calls so the core never owns a timer:
//!
//! 1. [`Wheel::begin_spin`] validates the options, resets rotation to zero,
//!    picks the winner and returns a [`SpinPlan`] for the host to animate.
//! 2. [`Wheel::settle_spin`] takes the rotation the animation came to rest
//!    at and reads the displayed winner back off the geometry.
//!
//! Phases run `Idle -> Spinning -> Settled -> Idle`. A spin requested while
//! `Spinning` is rejected and leaves the in-flight plan untouched.
//!
//! The displayed winner comes from the reverse lookup. The selector's pick
//! is only used if no segment sits under the pointer, and any disagreement
//! is logged.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{ConfigError, SpinConfig};
use crate::consts::MIN_SPIN_OPTIONS;
use crate::geometry::{Segment, plan_rotation, segment_under_pointer, segments};
use crate::model::{WheelOption, total_weight};
use crate::selector::{self, InvalidInput};

#[cfg(test)]
#[path = "wheel_test.rs"]
mod tests;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpinError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("a spin is already in progress")]
    AlreadySpinning,
    #[error("no spin in progress")]
    NotSpinning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HapticKind {
    /// Spin started.
    Heavy,
    /// Result revealed.
    Success,
}

/// Side effects the host should fire. The core only describes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Haptic(HapticKind),
    Confetti { duration_ms: u64 },
}

/// Everything the presentation layer needs to animate one spin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinPlan {
    pub winner_index: usize,
    pub winner_id: Uuid,
    /// Absolute rotation to animate to, starting from zero.
    pub target_rotation: f64,
    pub extra_turns: u32,
    pub animation_duration_ms: u64,
    /// Layout the plan was computed against; settle reads back from it.
    pub segments: Vec<Segment>,
    pub effects: Vec<Effect>,
}

/// Which path produced the displayed winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultSource {
    Geometry,
    SelectionFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinResult {
    pub winning_index: usize,
    pub winning_option_id: Uuid,
    pub rotation_degrees: f64,
    /// Index the selector picked before the animation.
    pub selected_index: usize,
    pub source: ResultSource,
    pub effects: Vec<Effect>,
}

impl SpinResult {
    #[must_use]
    pub fn agrees_with_selection(&self) -> bool {
        self.winning_index == self.selected_index
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning(SpinPlan),
    Settled(SpinResult),
}

// =============================================================================
// WHEEL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Wheel {
    config: SpinConfig,
    rotation: f64,
    phase: SpinPhase,
}

impl Wheel {
    /// Build an idle wheel.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`SpinConfig::validate`].
    pub fn new(config: SpinConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rotation: 0.0, phase: SpinPhase::Idle })
    }

    #[must_use]
    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// Current resting rotation. Zero while a spin is being planned.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning(_))
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&SpinResult> {
        match &self.phase {
            SpinPhase::Settled(result) => Some(result),
            _ => None,
        }
    }

    /// Whether the spin action should be enabled for `options`.
    #[must_use]
    pub fn can_spin(&self, options: &[WheelOption]) -> bool {
        !self.is_spinning() && check_spinnable(options).is_ok()
    }

    /// Pick a winner and plan the rotation that lands on it.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::AlreadySpinning`] mid-spin and
    /// [`SpinError::InvalidInput`] for fewer than two options or a zero
    /// total weight. The wheel is unchanged on error.
    pub fn begin_spin<R: Rng + ?Sized>(
        &mut self,
        options: &[WheelOption],
        rng: &mut R,
    ) -> Result<SpinPlan, SpinError> {
        if self.is_spinning() {
            return Err(SpinError::AlreadySpinning);
        }
        check_spinnable(options)?;

        let winner_index = selector::select(options, rng)?;
        let layout = segments(options);
        let extra_turns = rng.random_range(self.config.min_turns..=self.config.max_turns);
        let target_rotation = plan_rotation(&layout, winner_index, self.config.pointer_deg, extra_turns)
            .ok_or(InvalidInput::NoOptions)?;

        let plan = SpinPlan {
            winner_index,
            winner_id: options[winner_index].id,
            target_rotation,
            extra_turns,
            animation_duration_ms: self.config.spin_duration_ms,
            segments: layout,
            effects: vec![Effect::Haptic(HapticKind::Heavy)],
        };

        debug!(
            winner = %options[winner_index].name,
            winner_index,
            total_weight = total_weight(options),
            target_rotation,
            extra_turns,
            "spin started"
        );

        self.rotation = 0.0;
        self.phase = SpinPhase::Spinning(plan.clone());
        Ok(plan)
    }

    /// Finish the in-flight spin at `final_rotation` and reveal the result.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::NotSpinning`] when no spin is in flight.
    pub fn settle_spin(&mut self, final_rotation: f64) -> Result<SpinResult, SpinError> {
        let plan = match std::mem::take(&mut self.phase) {
            SpinPhase::Spinning(plan) => plan,
            other => {
                self.phase = other;
                return Err(SpinError::NotSpinning);
            }
        };

        let pointer = self.config.pointer_deg;
        let (winning_index, source) = match segment_under_pointer(&plan.segments, final_rotation, pointer) {
            Some(index) => {
                if index != plan.winner_index {
                    warn!(
                        selected = plan.winner_index,
                        displayed = index,
                        final_rotation,
                        "pointer landed off the selected segment"
                    );
                }
                (index, ResultSource::Geometry)
            }
            None => {
                warn!(selected = plan.winner_index, final_rotation, "no segment under pointer; using selection");
                (plan.winner_index, ResultSource::SelectionFallback)
            }
        };

        let winning_option_id = plan
            .segments
            .get(winning_index)
            .map_or(plan.winner_id, |segment| segment.option_id);

        let result = SpinResult {
            winning_index,
            winning_option_id,
            rotation_degrees: final_rotation,
            selected_index: plan.winner_index,
            source,
            effects: vec![
                Effect::Haptic(HapticKind::Success),
                Effect::Confetti { duration_ms: self.config.confetti_ms },
            ],
        };

        debug!(winning_index, final_rotation, ?source, "spin settled");

        self.rotation = final_rotation;
        self.phase = SpinPhase::Settled(result.clone());
        Ok(result)
    }

    /// Clear a settled result and return to `Idle`.
    ///
    /// Returns `false` (and does nothing) mid-spin or when already idle.
    pub fn dismiss(&mut self) -> bool {
        if matches!(self.phase, SpinPhase::Settled(_)) {
            self.phase = SpinPhase::Idle;
            true
        } else {
            false
        }
    }
}

fn check_spinnable(options: &[WheelOption]) -> Result<(), InvalidInput> {
    if options.len() < MIN_SPIN_OPTIONS {
        return Err(InvalidInput::TooFewOptions { count: options.len(), min: MIN_SPIN_OPTIONS });
    }
    if total_weight(options) == 0 {
        return Err(InvalidInput::ZeroTotalWeight);
    }
    Ok(())
}
