use thiserror::Error;

use crate::matrix::Matrix4D;

/// Errors raised while tracing a scene.
///
/// Every operation which needs the inverse of a transform (ray transforms,
/// normals, pattern lookups, camera rays) can fail with `NonInvertible`. The
/// error aborts whatever render requested it; there is no fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    #[error("transform is not invertible (determinant is zero):\n{0}")]
    NonInvertible(Matrix4D),
}

pub type TraceResult<T> = Result<T, TraceError>;
