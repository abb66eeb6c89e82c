//! Weighted selection: one random draw, walked against cumulative weights.
//!
//! DESIGN
//! ======
//! Draw `r` uniformly from `1..=total_weight`, then return the first option
//! whose running weight sum reaches `r`. Each option owns a contiguous run
//! of `weight` draws, so its probability is exactly `weight / total_weight`
//! whatever the option order. Order only decides which segment of the
//! wheel represents it.

use rand::Rng;

use crate::model::{WheelOption, total_weight};

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Reasons a list of options cannot be spun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("no options to choose from")]
    NoOptions,
    #[error("need at least {min} options to spin, have {count}")]
    TooFewOptions { count: usize, min: usize },
    #[error("total weight must be positive")]
    ZeroTotalWeight,
}

// =============================================================================
// SELECTION
// =============================================================================

/// Pick the winning index using a single draw from `rng`.
///
/// # Errors
///
/// Returns [`InvalidInput::NoOptions`] for an empty slice and
/// [`InvalidInput::ZeroTotalWeight`] when no option carries weight.
pub fn select<R: Rng + ?Sized>(options: &[WheelOption], rng: &mut R) -> Result<usize, InvalidInput> {
    if options.is_empty() {
        return Err(InvalidInput::NoOptions);
    }
    let total = total_weight(options);
    if total == 0 {
        return Err(InvalidInput::ZeroTotalWeight);
    }
    let draw = rng.random_range(1..=total);
    index_for_draw(options, draw).ok_or(InvalidInput::ZeroTotalWeight)
}

/// Map a draw in `1..=total_weight` to the option that owns it.
///
/// Returns `None` for a draw outside that range.
#[must_use]
pub fn index_for_draw(options: &[WheelOption], draw: u64) -> Option<usize> {
    if draw == 0 {
        return None;
    }
    let mut cumulative = 0u64;
    for (index, option) in options.iter().enumerate() {
        cumulative += u64::from(option.weight);
        if draw <= cumulative {
            return Some(index);
        }
    }
    None
}
