//! Wheel geometry: segment layout, forward rotation targeting and the
//! reverse "what is under the pointer" lookup.
//!
//! DESIGN
//! ======
//! Everything here derives from [`segments`]. The renderer draws from it
//! and the spin targets and reads back from it, so the drawn wheel and the
//! logical winner cannot disagree about where a segment lies.
//!
//! Angles are degrees in the wheel's own frame. Rotating the wheel by `r`
//! moves a point at angle `a` to `a + r`, and the pointer is a fixed angle
//! in that same frame.

use serde::Serialize;
use uuid::Uuid;

use crate::consts::FULL_TURN_DEG;
use crate::model::{WheelOption, total_weight};

#[cfg(test)]
#[path = "geometry_test.rs"]
mod tests;

/// Angular slice of the wheel owned by one option: `[start_deg, end_deg)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub option_id: Uuid,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl Segment {
    #[must_use]
    pub fn span_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    #[must_use]
    pub fn center_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Wrap any finite angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees_360(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if wrapped >= FULL_TURN_DEG { 0.0 } else { wrapped }
}

/// Lay the options out around the wheel, in order, starting at 0°.
///
/// Boundaries come from integer cumulative weights, so the first segment
/// starts at exactly 0, the last ends at exactly 360, and neighbours share
/// their boundary value bit for bit. With a zero total every segment is
/// empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn segments(options: &[WheelOption]) -> Vec<Segment> {
    let total = total_weight(options);
    let angle_at = |cumulative: u64| {
        if total == 0 {
            0.0
        } else {
            cumulative as f64 * FULL_TURN_DEG / total as f64
        }
    };

    let mut cumulative = 0u64;
    options
        .iter()
        .map(|option| {
            let start_deg = angle_at(cumulative);
            cumulative += u64::from(option.weight);
            Segment { option_id: option.id, start_deg, end_deg: angle_at(cumulative) }
        })
        .collect()
}

/// Rotation in `[0, 360)` that brings the winner's center under the pointer.
///
/// `None` when `winner` is out of range.
#[must_use]
pub fn rotation_for_winner(segments: &[Segment], winner: usize, pointer_deg: f64) -> Option<f64> {
    let segment = segments.get(winner)?;
    Some(normalize_degrees_360(FULL_TURN_DEG - segment.center_deg() + pointer_deg))
}

/// Full spin target from a zeroed wheel: the aligning rotation plus
/// `extra_turns` whole turns, which change the animation but not where it
/// comes to rest.
#[must_use]
pub fn plan_rotation(segments: &[Segment], winner: usize, pointer_deg: f64, extra_turns: u32) -> Option<f64> {
    rotation_for_winner(segments, winner, pointer_deg).map(|r| r + f64::from(extra_turns) * FULL_TURN_DEG)
}

/// Index of the segment sitting under the pointer once the wheel has come
/// to rest at `final_rotation`.
///
/// Rotated spans are inclusive at both ends and the first match in layout
/// order wins. A span whose rotated end is below its rotated start crosses
/// the 0°/360° seam. Empty segments never match.
#[must_use]
pub fn segment_under_pointer(segments: &[Segment], final_rotation: f64, pointer_deg: f64) -> Option<usize> {
    let offset = normalize_degrees_360(final_rotation);
    let pointer = normalize_degrees_360(pointer_deg);

    segments.iter().position(|segment| {
        if segment.span_deg() <= 0.0 {
            return false;
        }
        let start = normalize_degrees_360(segment.start_deg + offset);
        let end = normalize_degrees_360(segment.end_deg + offset);
        if start < end {
            pointer >= start && pointer <= end
        } else {
            pointer >= start || pointer <= end
        }
    })
}
