//! Per-frame integration and velocity decay.

use crate::gesture::{MAX_PAN_VELOCITY, SENSITIVITY};
use crate::math::{rotation_matrix, Axis};
use crate::scene::CubeScene;
use crate::state::CubeState;
use tracing::{trace, warn};

/// Axis the frame loop spins the cube about
pub const FRAME_AXIS: Axis = Axis::Y;

/// `(threshold, step)` pairs: a speed above `threshold` loses `step` per frame
pub const DECAY_TIERS: [(f32, f32); 3] = [(100.0, 100.0), (10.0, 10.0), (0.0, 1.0)];

/// Whether a frame reached the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Applied,
    /// State was not finite; the previous transform stays on screen
    Skipped,
}

/// One decay step: round to a whole speed, then step toward zero by the
/// tier's amount without crossing it.
///
/// Speeds beyond [`MAX_PAN_VELOCITY`] are clamped first; past that `f32`
/// can no longer represent a one-step change.
pub fn decay_velocity(velocity: f32) -> f32 {
    let velocity = velocity.clamp(-MAX_PAN_VELOCITY, MAX_PAN_VELOCITY);
    let magnitude = velocity.abs();
    let Some(&(_, step)) = DECAY_TIERS
        .iter()
        .find(|(threshold, _)| magnitude > *threshold)
    else {
        return velocity;
    };

    let remaining = velocity.round().abs() - step;
    if remaining <= 0.0 {
        0.0
    } else {
        remaining.copysign(velocity)
    }
}

/// Advances the cube by one rendered frame.
///
/// Integrates the angle from the current velocity, replaces the root
/// transform with the rotation for that angle, then decays the velocity.
/// Never fails: a non-finite state skips the frame and recovers.
pub fn tick(state: &mut CubeState, scene: &mut CubeScene) -> FrameOutcome {
    trace!(
        velocity_x = state.velocity_x,
        velocity_y = state.velocity_y,
        "frame"
    );

    if !state.velocity_x.is_finite() {
        warn!(velocity_x = state.velocity_x, "dropping non-finite velocity");
        state.velocity_x = 0.0;
        return FrameOutcome::Skipped;
    }

    let rotation_x = state.rotation_x + state.velocity_x * SENSITIVITY;
    if !rotation_x.is_finite() {
        warn!(rotation_x = state.rotation_x, "skipping frame with non-finite rotation");
        state.velocity_x = 0.0;
        if !state.rotation_x.is_finite() {
            state.rotation_x = 0.0;
        }
        return FrameOutcome::Skipped;
    }
    state.rotation_x = rotation_x;

    scene.set_root_transform(rotation_matrix(rotation_x, FRAME_AXIS));

    state.velocity_x = decay_velocity(state.velocity_x);
    FrameOutcome::Applied
}
