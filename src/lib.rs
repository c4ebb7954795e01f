pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod color;
pub mod pattern;
pub mod light;

pub mod shape;
pub mod intersect;
pub mod world;
pub mod camera;

pub mod canvas;
pub mod scene;

use crate::consts::FEQ_EPSILON;

/// Approximate floating point equality, used by every `PartialEq` in the
/// crate.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
