//! A six-sided cube spun by pan gestures.
//!
//! Pan samples set the cube's horizontal velocity ([`gesture::apply_pan`]);
//! every rendered frame integrates that velocity into an angle about the
//! vertical axis, replaces the root transform with the matching rotation
//! ([`math::rotation_matrix`]), and bleeds the velocity off in coarse tiers
//! ([`update::tick`]). [`view::CubeView`] ties the pieces to one owner.

pub mod config;
pub mod error;
pub mod gesture;
pub mod graphics;
pub mod math;
pub mod scene;
pub mod state;
pub mod update;
pub mod vertex;
pub mod view;

pub use error::CubeError;
pub use gesture::{apply_pan, PanSample, PanTracker, SENSITIVITY};
pub use math::{rotation_matrix, rotation_matrix_for, Axis, Mat4};
pub use state::CubeState;
pub use update::{decay_velocity, tick, FrameOutcome, DECAY_TIERS, FRAME_AXIS};
pub use view::CubeView;
