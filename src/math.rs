use crate::error::CubeError;
use crossterm::style::Color;
use std::fmt;
use std::str::FromStr;

/// Row-major 4x4 homogeneous matrix
pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Axis a rotation matrix turns about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl FromStr for Axis {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            _ => Err(CubeError::InvalidAxisSelector(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Builds the right-handed rotation of `angle` radians about `axis`
pub fn rotation_matrix(angle: f32, axis: Axis) -> Mat4 {
    let (sin_a, cos_a) = angle.sin_cos();
    match axis {
        Axis::X => [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos_a, -sin_a, 0.0],
            [0.0, sin_a, cos_a, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Axis::Y => [
            [cos_a, 0.0, sin_a, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-sin_a, 0.0, cos_a, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    }
}

/// Same as [`rotation_matrix`], for callers holding a textual axis selector
pub fn rotation_matrix_for(angle: f32, selector: &str) -> Result<Mat4, CubeError> {
    let axis = selector.parse::<Axis>()?;
    Ok(rotation_matrix(angle, axis))
}

/// Multiplies two 4x4 matrices
pub fn multiply_matrices(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Transforms a point (w = 1) by a homogeneous matrix
pub fn transform_point(matrix: &Mat4, point: &[f32; 3]) -> [f32; 3] {
    let v = [point[0], point[1], point[2], 1.0];
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..4 {
            result[i] += matrix[i][j] * v[j];
        }
    }
    result
}

/// Transforms a direction (w = 0), ignoring translation
pub fn transform_direction(matrix: &Mat4, direction: &[f32; 3]) -> [f32; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * direction[j];
        }
    }
    result
}

/// Determinant of the upper-left 3x3 block
pub fn determinant3(m: &Mat4) -> f32 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Edge function used in rasterization
pub fn edge_function(a: &[f32; 2], b: &[f32; 2], c: &[f32; 2]) -> f32 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// True when `p` lies inside triangle `abc`, for either winding
pub fn point_in_triangle(p: [f32; 2], a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> bool {
    let w0 = edge_function(&b, &c, &p);
    let w1 = edge_function(&c, &a, &p);
    let w2 = edge_function(&a, &b, &p);
    (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0) || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0)
}

/// Calculates the normal vector of a triangle
pub fn calculate_normal(a: &[f32; 3], b: &[f32; 3], c: &[f32; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let normal = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let length = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
    if length == 0.0 {
        return [0.0; 3];
    }
    [normal[0] / length, normal[1] / length, normal[2] / length]
}

/// Light intensity for a surface point, never below the ambient floor
pub fn calculate_light_intensity(
    normal: &[f32; 3],
    position: &[f32; 3],
    light_pos: &[f32; 3],
) -> f32 {
    const AMBIENT: f32 = 0.25;

    let light_dir = [
        light_pos[0] - position[0],
        light_pos[1] - position[1],
        light_pos[2] - position[2],
    ];
    let length = (light_dir[0] * light_dir[0]
        + light_dir[1] * light_dir[1]
        + light_dir[2] * light_dir[2])
        .sqrt();
    if length == 0.0 {
        return 1.0;
    }
    // Planes are two-sided, so light whichever side faces the lamp
    let dot_product =
        (normal[0] * light_dir[0] + normal[1] * light_dir[1] + normal[2] * light_dir[2]) / length;
    dot_product.abs().max(AMBIENT)
}

/// Applies lighting to a color
pub fn apply_lighting(color: Color, intensity: f32) -> Color {
    match color {
        Color::Rgb { r, g, b } => {
            let shade = |c: u8| (c as f32 * intensity).clamp(0.0, 255.0) as u8;
            Color::Rgb {
                r: shade(r),
                g: shade(g),
                b: shade(b),
            }
        }
        other => other,
    }
}
