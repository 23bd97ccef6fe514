use thiserror::Error;

/// Errors surfaced by the rotation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CubeError {
    /// Axis selector outside of `{x, y}`
    #[error("invalid axis selector `{0}` (expected `x` or `y`)")]
    InvalidAxisSelector(String),
    /// NaN or infinite value offered to the cube state
    #[error("non-finite {field}: {value}")]
    NonFiniteInput { field: &'static str, value: f32 },
}
