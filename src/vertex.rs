/// Vertex structure with position, screen position, and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// World-space position after the root transform
    pub position: [f32; 3],
    /// Position on the viewport, in pixels
    pub screen_position: [f32; 2],
    /// Distance from the camera along its view direction
    pub depth: f32,
    pub normal: [f32; 3],
}
