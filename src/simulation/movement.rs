//! Step-limited movement toward a target point
//!
//! Shared by the collect approach, the depot return, and wandering, so the
//! snap-on-arrival rule is identical everywhere.

use crate::core::types::Vec2;

/// Advance `position` toward `target` by at most `max_step`.
///
/// Returns the new position and whether the target was reached. When the
/// remaining distance fits within one step the position snaps to `target`
/// exactly, so arrival never oscillates or overshoots.
pub fn move_toward(position: Vec2, target: Vec2, max_step: f32) -> (Vec2, bool) {
    let distance = position.distance(&target);
    if distance <= max_step {
        // Covers position == target, keeping the division below guarded
        return (target, true);
    }

    let direction = (target - position).normalize();
    (position + direction * max_step, false)
}
