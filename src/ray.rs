use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;

/// A ray with an origin (a point) and a direction (a vector).
///
/// The direction is not required to be unit length; transforming a ray into
/// a scaled object's space will generally stretch it, and intersection `t`
/// values stay consistent with the stretched direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray4D {
    pub origin: Tuple4D,
    pub direction: Tuple4D,
}

impl Ray4D {
    /// Creates a ray. The `w` components of `origin` and `direction` are
    /// forced to `1.0` and `0.0` respectively.
    pub fn new(mut origin: Tuple4D, mut direction: Tuple4D) -> Ray4D {
        if !origin.is_point() {
            origin.w = 1.0;
        }

        if !direction.is_vector() {
            direction.w = 0.0;
        }

        Ray4D { origin, direction }
    }

    /// The point at distance `t` along the ray.
    pub fn position(&self, t: f64) -> Tuple4D {
        self.origin + (t * self.direction)
    }

    /// Applies `m` to both the origin and the direction.
    pub fn transform(&self, m: Matrix4D) -> Ray4D {
        Ray4D {
            origin: m * self.origin,
            direction: m * self.direction,
        }
    }
}

#[test]
fn ray_holds_origin_and_direction() {
    let origin = Tuple4D::point(1.0, 2.0, 3.0);
    let direction = Tuple4D::vector(4.0, 5.0, 6.0);
    let r = Ray4D::new(origin, direction);

    assert_eq!(r.origin, origin);
    assert_eq!(r.direction, direction);
}

#[test]
fn ray_new_fixes_w_components() {
    let r = Ray4D::new(
                Tuple4D::tuple(1.0, 2.0, 3.0, 0.0),
                Tuple4D::tuple(4.0, 5.0, 6.0, 1.0)
            );

    assert!(r.origin.is_point());
    assert!(r.direction.is_vector());
}

#[test]
fn ray_position() {
    let r = Ray4D::new(
                Tuple4D::point(2.0, 3.0, 4.0),
                Tuple4D::vector(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple4D::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple4D::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple4D::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple4D::point(4.5, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            );
    let t = r.transform(Matrix4D::translation(3.0, 4.0, 5.0));

    assert_eq!(t.origin, Tuple4D::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple4D::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_scaling() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            );
    let t = r.transform(Matrix4D::scaling(2.0, 3.0, 4.0));

    assert_eq!(t.origin, Tuple4D::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple4D::vector(0.0, 3.0, 0.0));
}
