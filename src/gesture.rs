//! Pan gestures: tracking pointer drags and mapping them onto the cube state.

use crate::error::CubeError;
use crate::state::CubeState;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Radians of rotation per unit of pan velocity
pub const SENSITIVITY: f32 = 0.0001;

/// Pointer resting this long before release ends the drag without a fling
pub const STATIONARY_RELEASE: Duration = Duration::from_millis(100);

/// Pan speeds are clamped to this magnitude, which keeps them well inside
/// the range where `f32` holds whole numbers exactly
pub const MAX_PAN_VELOCITY: f32 = 1.0e6;

const MIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(1);

/// Instantaneous pan velocity, in view pixels per second
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanSample {
    pub x: f32,
    pub y: f32,
}

impl PanSample {
    pub fn new(x: f32, y: f32) -> Self {
        PanSample { x, y }
    }
}

/// Feeds one pan sample into the cube state.
///
/// The horizontal velocity is overwritten, not accumulated, and the angle
/// is nudged by the same amount a frame tick would add. Samples carrying
/// NaN or infinity are rejected and leave the state untouched; finite
/// speeds beyond [`MAX_PAN_VELOCITY`] are clamped to it.
pub fn apply_pan(state: &mut CubeState, sample: PanSample) -> Result<(), CubeError> {
    for (field, value) in [("pan velocity x", sample.x), ("pan velocity y", sample.y)] {
        if !value.is_finite() {
            warn!(field, value, "rejecting pan sample");
            return Err(CubeError::NonFiniteInput { field, value });
        }
    }

    let velocity_x = sample.x.clamp(-MAX_PAN_VELOCITY, MAX_PAN_VELOCITY);
    if velocity_x != sample.x {
        debug!(requested = sample.x, velocity_x, "clamping pan velocity");
    }

    let rotation_x = state.rotation_x + velocity_x * SENSITIVITY;
    if !rotation_x.is_finite() {
        warn!(rotation_x, "rejecting pan onto non-finite rotation");
        return Err(CubeError::NonFiniteInput {
            field: "rotation x",
            value: rotation_x,
        });
    }

    state.velocity_x = velocity_x;
    state.rotation_x = rotation_x;
    debug!(velocity_x, rotation_x, "pan");
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct PointerPosition {
    column: u16,
    row: u16,
    at: Instant,
}

/// Turns terminal drag events into pan velocity samples
#[derive(Debug, Clone)]
pub struct PanTracker {
    cell_width: f32,
    cell_height: f32,
    last: Option<PointerPosition>,
}

impl PanTracker {
    /// `cell_width` and `cell_height` are the pixel size of one terminal cell
    pub fn new(cell_width: f32, cell_height: f32) -> Self {
        PanTracker {
            cell_width,
            cell_height,
            last: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn begin(&mut self, column: u16, row: u16, at: Instant) {
        self.last = Some(PointerPosition { column, row, at });
    }

    /// Reports the velocity since the previous pointer position
    pub fn drag(&mut self, column: u16, row: u16, at: Instant) -> Option<PanSample> {
        let prev = self.last?;
        if prev.column == column && prev.row == row {
            return None;
        }

        let elapsed = at
            .saturating_duration_since(prev.at)
            .max(MIN_SAMPLE_INTERVAL)
            .as_secs_f32();
        let dx = (column as f32 - prev.column as f32) * self.cell_width;
        let dy = (row as f32 - prev.row as f32) * self.cell_height;
        self.last = Some(PointerPosition { column, row, at });

        Some(PanSample::new(dx / elapsed, dy / elapsed))
    }

    /// Ends the drag; a pointer that stopped before release yields a zero sample
    pub fn end(&mut self, at: Instant) -> Option<PanSample> {
        let prev = self.last.take()?;
        if at.saturating_duration_since(prev.at) >= STATIONARY_RELEASE {
            Some(PanSample::default())
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.last = None;
    }
}
