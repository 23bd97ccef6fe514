//! The six-plane cube, its root node, and the camera looking at it.

use crate::math::{calculate_normal, point_in_triangle, transform_point, Mat4, IDENTITY};
use crate::vertex::Vertex;
use crossterm::style::Color;

/// Half the edge length of the cube
pub const HALF_EXTENT: f32 = 2.5;
/// Camera sits on the +z axis looking back at the origin
pub const CAMERA_DISTANCE: f32 = 20.0;
pub const FIELD_OF_VIEW_DEGREES: f32 = 30.0;

const NEAR_PLANE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceId {
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
}

impl FaceId {
    pub const ALL: [FaceId; 6] = [
        FaceId::Front,
        FaceId::Back,
        FaceId::Top,
        FaceId::Bottom,
        FaceId::Left,
        FaceId::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FaceId::Front => "front",
            FaceId::Back => "back",
            FaceId::Top => "top",
            FaceId::Bottom => "bottom",
            FaceId::Left => "left",
            FaceId::Right => "right",
        }
    }

    /// Material color of the plane
    pub fn color(self) -> Color {
        match self {
            FaceId::Front => Color::Rgb { r: 255, g: 214, b: 10 },
            FaceId::Back => Color::Rgb { r: 255, g: 255, b: 255 },
            FaceId::Top => Color::Rgb { r: 52, g: 199, b: 89 },
            FaceId::Bottom => Color::Rgb { r: 255, g: 59, b: 48 },
            FaceId::Left => Color::Rgb { r: 0, g: 122, b: 255 },
            FaceId::Right => Color::Rgb { r: 175, g: 82, b: 222 },
        }
    }

    // Indices into the corner table, counter-clockwise seen from outside
    fn corner_indices(self) -> [usize; 4] {
        match self {
            FaceId::Front => [4, 5, 6, 7],
            FaceId::Back => [1, 0, 3, 2],
            FaceId::Top => [7, 6, 2, 3],
            FaceId::Bottom => [0, 1, 5, 4],
            FaceId::Left => [0, 4, 7, 3],
            FaceId::Right => [5, 1, 2, 6],
        }
    }
}

/// One square plane of the cube, in the root node's local space
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub id: FaceId,
    pub color: Color,
    pub corners: [[f32; 3]; 4],
}

/// Node holding every face; its transform is replaced each frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub transform: Mat4,
}

impl Default for SceneNode {
    fn default() -> Self {
        SceneNode {
            transform: IDENTITY,
        }
    }
}

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub zoom: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, zoom: f32) -> Self {
        Viewport {
            width,
            height,
            zoom,
        }
    }

    fn focal_length(&self) -> f32 {
        let half_fov = FIELD_OF_VIEW_DEGREES.to_radians() / 2.0;
        (self.height / 2.0) / half_fov.tan() * self.zoom
    }

    /// Projects a world-space point through the camera
    pub fn project(&self, position: [f32; 3], normal: [f32; 3]) -> Vertex {
        let depth = (CAMERA_DISTANCE - position[2]).max(NEAR_PLANE);
        let f = self.focal_length();
        Vertex {
            position,
            screen_position: [
                self.width / 2.0 + position[0] * f / depth,
                self.height / 2.0 - position[1] * f / depth,
            ],
            depth,
            normal,
        }
    }
}

/// Face with its corners carried through the root transform and camera
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    pub id: FaceId,
    pub color: Color,
    pub corners: [Vertex; 4],
}

impl ProjectedFace {
    /// The quad as two triangles
    pub fn triangles(&self) -> [[&Vertex; 3]; 2] {
        let [a, b, c, d] = &self.corners;
        [[a, b, c], [a, c, d]]
    }

    pub fn contains(&self, point: [f32; 2]) -> bool {
        self.triangles().iter().any(|[a, b, c]| {
            point_in_triangle(point, a.screen_position, b.screen_position, c.screen_position)
        })
    }

    pub fn mean_depth(&self) -> f32 {
        self.corners.iter().map(|v| v.depth).sum::<f32>() / 4.0
    }
}

/// Six colored planes hanging off one root node
#[derive(Debug, Clone, PartialEq)]
pub struct CubeScene {
    faces: Vec<Face>,
    root: SceneNode,
}

impl Default for CubeScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeScene {
    pub fn new() -> Self {
        let h = HALF_EXTENT;
        let corners = [
            [-h, -h, -h], // 0
            [h, -h, -h],  // 1
            [h, h, -h],   // 2
            [-h, h, -h],  // 3
            [-h, -h, h],  // 4
            [h, -h, h],   // 5
            [h, h, h],    // 6
            [-h, h, h],   // 7
        ];

        let faces = FaceId::ALL
            .iter()
            .map(|&id| Face {
                id,
                color: id.color(),
                corners: id.corner_indices().map(|i| corners[i]),
            })
            .collect();

        CubeScene {
            faces,
            root: SceneNode::default(),
        }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    /// Replaces the root transform outright
    pub fn set_root_transform(&mut self, transform: Mat4) {
        self.root.transform = transform;
    }

    /// Carries every face through the root transform and the camera
    pub fn project(&self, viewport: &Viewport) -> Vec<ProjectedFace> {
        self.faces
            .iter()
            .map(|face| {
                let world = face
                    .corners
                    .map(|corner| transform_point(&self.root.transform, &corner));
                let normal = calculate_normal(&world[0], &world[1], &world[2]);
                ProjectedFace {
                    id: face.id,
                    color: face.color,
                    corners: world.map(|position| viewport.project(position, normal)),
                }
            })
            .collect()
    }

    /// Nearest face under a viewport point
    pub fn pick(&self, viewport: &Viewport, point: [f32; 2]) -> Option<FaceId> {
        self.project(viewport)
            .into_iter()
            .filter(|face| face.contains(point))
            .min_by(|a, b| a.mean_depth().total_cmp(&b.mean_depth()))
            .map(|face| face.id)
    }
}
