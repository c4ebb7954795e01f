use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::shape::Shape;
use crate::error::TraceResult;

/// The procedural textures a `Pattern` can sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatternType {
    /// Alternates `a` and `b` every unit along X.
    Stripe,

    /// Blends from `a` to `b` across each unit along X, then starts over.
    Gradient,

    /// Concentric rings around the Y axis, one unit wide.
    Ring,

    /// A 3D checkerboard of unit cubes.
    Checker,
}

/// A pattern record.
///
/// Patterns are infinite and tile in every direction. They are sampled in
/// pattern space: a world-space point is first brought into the space of the
/// shape being shaded, then into the pattern's own space through its
/// `transform`. Scaling a pattern by `0.25` therefore gives stripes a
/// quarter of a unit wide, independently of how the shape is scaled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    pub ty: PatternType,
    pub a: Color,
    pub b: Color,
    pub transform: Matrix4D,
}

impl Pattern {
    pub fn new(ty: PatternType, a: Color, b: Color) -> Pattern {
        Pattern { ty, a, b, transform: Matrix4D::identity() }
    }

    pub fn stripe(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternType::Stripe, a, b)
    }

    pub fn gradient(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternType::Gradient, a, b)
    }

    pub fn ring(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternType::Ring, a, b)
    }

    pub fn checker(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternType::Checker, a, b)
    }

    /// Returns the pattern with `transform` replacing its current transform.
    pub fn with_transform(mut self, transform: Matrix4D) -> Pattern {
        self.transform = transform;
        self
    }

    /// Picks `a` for even values of `n` and `b` for odd ones.
    ///
    /// `n` is always a whole number here; Euclidean remainder keeps negative
    /// cells alternating in step with positive ones.
    fn alternate(&self, n: f64) -> Color {
        if n.rem_euclid(2.0) == 0.0 {
            self.a
        } else {
            self.b
        }
    }

    /// Samples the pattern at a point in pattern space.
    pub fn pattern_at(&self, p: Tuple4D) -> Color {
        match self.ty {
            PatternType::Stripe => self.alternate(p.x.floor()),
            PatternType::Gradient => {
                let fraction = p.x - p.x.floor();
                self.a + (self.b - self.a) * fraction
            },
            PatternType::Ring => {
                let distance = (p.x.powi(2) + p.z.powi(2)).sqrt();
                self.alternate(distance.floor())
            },
            PatternType::Checker => {
                self.alternate(p.x.floor() + p.y.floor() + p.z.floor())
            },
        }
    }

    /// Samples the pattern at a world-space point on `obj`.
    ///
    /// Fails if either the shape's or the pattern's transform has no inverse.
    pub fn pattern_at_object(&self, obj: &Shape, world_point: Tuple4D)
        -> TraceResult<Color> {
        let object_point = obj.transform.inverse()? * world_point;
        let pattern_point = self.transform.inverse()? * object_point;

        Ok(self.pattern_at(pattern_point))
    }
}

#[test]
fn stripe_pattern_is_constant_along_y_and_z() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    for p in [
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::point(0.0, 2.0, 0.0),
        Tuple4D::point(0.0, 0.0, 1.0),
        Tuple4D::point(0.0, 0.0, 2.0),
    ].iter() {
        assert_eq!(pattern.pattern_at(*p), Color::white());
    }
}

#[test]
fn stripe_pattern_alternates_along_x() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point( 0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point( 0.9, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point( 1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.1, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-1.1, 0.0, 0.0)),
        Color::white());
}

#[test]
fn stripes_with_object_transformation() {
    let mut obj = Shape::sphere();
    obj.transform = Matrix4D::scaling(2.0, 2.0, 2.0);
    let pattern = Pattern::stripe(Color::white(), Color::black());

    let c = pattern.pattern_at_object(&obj, Tuple4D::point(1.5, 0.0, 0.0));
    assert_eq!(c, Ok(Color::white()));
}

#[test]
fn stripes_with_pattern_transformation() {
    let obj = Shape::sphere();
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0));

    let c = pattern.pattern_at_object(&obj, Tuple4D::point(1.5, 0.0, 0.0));
    assert_eq!(c, Ok(Color::white()));
}

#[test]
fn stripes_with_object_and_pattern_transformation() {
    let mut obj = Shape::sphere();
    obj.transform = Matrix4D::scaling(2.0, 2.0, 2.0);
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix4D::translation(0.5, 0.0, 0.0));

    // World x = 2.5 is object x = 1.25, which is pattern x = 0.75.
    let c = pattern.pattern_at_object(&obj, Tuple4D::point(2.5, 0.0, 0.0));
    assert_eq!(c, Ok(Color::white()));

    // World x = 3.5 is pattern x = 1.25.
    let c = pattern.pattern_at_object(&obj, Tuple4D::point(3.5, 0.0, 0.0));
    assert_eq!(c, Ok(Color::black()));
}

#[test]
fn singular_pattern_transform_is_an_error() {
    use crate::error::TraceError;

    let obj = Shape::sphere();
    let singular = Matrix4D::scaling(1.0, 0.0, 1.0);
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(singular);

    assert_eq!(
        pattern.pattern_at_object(&obj, Tuple4D::point(0.0, 0.0, 0.0)),
        Err(TraceError::NonInvertible(singular))
    );
}

#[test]
fn gradient_linearly_interpolates() {
    let pattern = Pattern::gradient(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.25, 0.0, 0.0)),
        Color::rgb(0.75, 0.75, 0.75));
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.5, 0.0, 0.0)),
        Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.75, 0.0, 0.0)),
        Color::rgb(0.25, 0.25, 0.25));

    // Starts over at every whole x.
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.25, 0.0, 0.0)),
        Color::rgb(0.75, 0.75, 0.75));
}

#[test]
fn ring_extends_in_x_and_z() {
    let pattern = Pattern::ring(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.708, 0.0, 0.708)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 5.0, 2.1)),
        Color::white());
}

#[test]
fn checkers_repeat_in_each_axis() {
    let pattern = Pattern::checker(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.99, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.01, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.99, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 1.01, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.99)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.01)),
        Color::black());
}

#[test]
fn checkers_follow_parity_of_floor_sum() {
    let pattern = Pattern::checker(Color::white(), Color::black());

    // floor sums: -1, 0, -2, 1
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.5, 0.2, 0.2)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.5, 1.2, 0.2)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.5, -0.5, 0.2)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.5, -0.5, 1.2)),
        Color::black());
}
