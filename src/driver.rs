//! Timer-driven spin for hosts without their own animation clock.
//!
//! Begins the spin, sleeps for the plan's animation duration on the tokio
//! timer, then settles at the planned rotation. The result is never
//! revealed before the full duration has elapsed.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::model::WheelOption;
use crate::wheel::{SpinError, SpinPlan, SpinResult, Wheel};

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;

/// Run one complete spin and return the plan alongside the settled result.
///
/// Dropping the future mid-animation (a lost `tokio::select!` branch, a
/// timeout) still settles the wheel at the planned rotation, so it never
/// stays stuck in `Spinning`. The caller then reads the outcome from
/// [`Wheel::last_result`].
///
/// # Errors
///
/// Returns [`SpinError`] from [`Wheel::begin_spin`] before any waiting
/// when the wheel is mid-spin or `options` cannot be spun.
pub async fn spin_to_rest<R: Rng + ?Sized>(
    wheel: &mut Wheel,
    options: &[WheelOption],
    rng: &mut R,
) -> Result<(SpinPlan, SpinResult), SpinError> {
    let plan = wheel.begin_spin(options, rng)?;
    let guard = SettleOnDrop { wheel, target_rotation: plan.target_rotation, armed: true };

    let duration = Duration::from_millis(plan.animation_duration_ms);
    debug!(duration_ms = plan.animation_duration_ms, "waiting for spin animation");
    tokio::time::sleep(duration).await;

    let result = guard.settle()?;
    Ok((plan, result))
}

/// Settles the borrowed wheel at `target_rotation` unless disarmed first.
struct SettleOnDrop<'a> {
    wheel: &'a mut Wheel,
    target_rotation: f64,
    armed: bool,
}

impl SettleOnDrop<'_> {
    fn settle(mut self) -> Result<SpinResult, SpinError> {
        self.armed = false;
        self.wheel.settle_spin(self.target_rotation)
    }
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.wheel.settle_spin(self.target_rotation) {
            Ok(result) => debug!(winning_index = result.winning_index, "spin cancelled mid-animation; settled early"),
            Err(e) => warn!(error = %e, "spin cancelled mid-animation; could not settle"),
        }
    }
}
