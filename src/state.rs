/// Rotation state of the cube
///
/// The `x` fields describe the horizontal pan: `rotation_x` is the angle
/// about the vertical (y) axis and `velocity_x` the speed driving it.
/// `rotation_y` and `velocity_y` are carried alongside but nothing drives
/// them yet.
///
/// A single instance is owned by the view and mutated only from the thread
/// that delivers both gesture samples and frame ticks, so it is not locked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CubeState {
    /// Accumulated angle about the vertical axis, in radians (unbounded)
    pub rotation_x: f32,
    /// Accumulated angle about the horizontal axis, in radians
    pub rotation_y: f32,
    /// Horizontal pan velocity, in view pixels per second
    pub velocity_x: f32,
    /// Vertical pan velocity, in view pixels per second
    pub velocity_y: f32,
}

impl CubeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the cube has stopped spinning on its own
    pub fn is_at_rest(&self) -> bool {
        self.velocity_x == 0.0
    }
}

/// Presentation toggles for the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Enable debug overlay
    pub debug: bool,
    /// Frame updates suspended
    pub paused: bool,
    /// Wireframe mode enabled
    pub wireframe: bool,
    /// Zoom level
    pub zoom: f32,
    /// Light position in world space
    pub light_position: [f32; 3],
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            debug: false,
            paused: false,
            wireframe: false,
            zoom: 1.0,
            light_position: [6.0, 8.0, 20.0],
        }
    }
}

impl ViewState {
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 10.0;

    /// Multiplies the zoom level, keeping it in range
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }
}
