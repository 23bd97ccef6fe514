//! The view that owns the cube: its state, its scene, and its frame registration.

use crate::error::CubeError;
use crate::gesture::{apply_pan, PanSample};
use crate::scene::CubeScene;
use crate::state::CubeState;
use crate::update::{tick, FrameOutcome};
use tracing::{debug, info};

/// Live registration for per-frame updates.
///
/// Frames reach the view only while this is held; dropping it releases
/// the registration on every exit path.
#[derive(Debug, Default)]
pub struct FrameSubscription {
    frames: u64,
    skipped: u64,
}

impl FrameSubscription {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn record(&mut self, outcome: FrameOutcome) {
        self.frames += 1;
        if outcome == FrameOutcome::Skipped {
            self.skipped += 1;
        }
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        debug!(
            frames = self.frames,
            skipped = self.skipped,
            "frame subscription released"
        );
    }
}

/// Owns the single [`CubeState`] of a viewing session.
///
/// Gesture samples and frame ticks must both be delivered from the same
/// thread; the view takes `&mut self` for each and holds no lock.
#[derive(Debug, Default)]
pub struct CubeView {
    state: CubeState,
    scene: CubeScene,
    subscription: Option<FrameSubscription>,
}

impl CubeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a state prepared by the host
    pub fn with_state(state: CubeState) -> Self {
        CubeView {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }

    pub fn scene(&self) -> &CubeScene {
        &self.scene
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Frames delivered under the current subscription
    pub fn frames(&self) -> u64 {
        self.subscription.as_ref().map_or(0, FrameSubscription::frames)
    }

    /// Registers for frame updates; calling it again keeps the existing registration
    pub fn setup(&mut self) {
        if self.subscription.is_none() {
            info!("cube view subscribed to frame updates");
            self.subscription = Some(FrameSubscription::default());
        }
    }

    /// Releases the frame registration
    pub fn teardown(&mut self) {
        if self.subscription.take().is_some() {
            info!("cube view torn down");
        }
    }

    /// Per-frame trigger; ignored unless subscribed
    pub fn on_frame(&mut self) -> Option<FrameOutcome> {
        let subscription = self.subscription.as_mut()?;
        let outcome = tick(&mut self.state, &mut self.scene);
        subscription.record(outcome);
        Some(outcome)
    }

    /// Per-gesture trigger
    pub fn on_pan(&mut self, sample: PanSample) -> Result<(), CubeError> {
        apply_pan(&mut self.state, sample)
    }

    /// Stops the cube and turns it back to face the camera
    pub fn reset(&mut self) {
        self.state = CubeState::default();
        self.scene = CubeScene::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::IDENTITY;

    #[test]
    fn frames_only_arrive_while_subscribed() {
        let mut view = CubeView::with_state(CubeState {
            velocity_x: 250.0,
            ..CubeState::default()
        });
        assert_eq!(view.on_frame(), None);
        assert_eq!(view.state().velocity_x, 250.0);

        view.setup();
        view.setup();
        assert!(view.is_subscribed());
        assert_eq!(view.on_frame(), Some(FrameOutcome::Applied));
        assert_eq!(view.on_frame(), Some(FrameOutcome::Applied));
        assert_eq!(view.frames(), 2);
        assert_eq!(view.state().velocity_x, 50.0);

        view.teardown();
        assert!(!view.is_subscribed());
        assert_eq!(view.frames(), 0);
        assert_eq!(view.on_frame(), None);
        assert_eq!(view.state().velocity_x, 50.0);
    }

    #[test]
    fn pans_reach_the_state() {
        let mut view = CubeView::new();
        view.on_pan(PanSample::new(120.0, 0.0)).unwrap();
        assert_eq!(view.state().velocity_x, 120.0);
        assert!(view.on_pan(PanSample::new(f32::NAN, 0.0)).is_err());
        assert_eq!(view.state().velocity_x, 120.0);
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut view = CubeView::new();
        view.setup();
        view.on_pan(PanSample::new(800.0, 0.0)).unwrap();
        view.on_frame();
        assert_ne!(view.scene().root().transform, IDENTITY);

        view.reset();
        assert_eq!(*view.state(), CubeState::default());
        assert_eq!(view.scene().root().transform, IDENTITY);
        assert!(view.is_subscribed());
    }
}
