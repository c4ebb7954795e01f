use std::ops::Index;
use std::slice::Iter;

use crate::consts::SHADOW_BIAS;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::shape::Shape;
use crate::error::TraceResult;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin).
///
/// The `what` field borrows the shape that was hit, so an intersection can
/// never outlive the world holding that shape.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Shape,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if the underlying *pointers* of the
/// intersections are equivalent.
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, what: &'a Shape) -> Intersection<'a> {
        Intersection { t, what }
    }

    /// Prepares the shading state for this intersection along `r`, using the
    /// default surface bias.
    pub fn prepare_computations(&self, r: &Ray4D)
        -> TraceResult<IntersectionComputation<'a>> {
        IntersectionComputation::new(r, self)
    }
}

/// A collection of intersections, kept sorted by `t`.
///
/// Mostly a wrapper for a vector of `Intersection` objects. See the
/// `Intersection` documentation for more information.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    intersections: Vec<Intersection<'a>>,
}

/// Builds a sorted collection. The sort is stable, so intersections with
/// equal `t` keep the order they were given in.
impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        let mut xs = Intersections { intersections };
        xs.sort();
        xs
    }
}

impl<'a> Index<usize> for Intersections<'a> {
    type Output = Intersection<'a>;

    fn index(&self, index: usize) -> &Intersection<'a> {
        &self.intersections[index]
    }
}

impl<'a> Intersections<'a> {
    /// Creates a new, empty list of intersections.
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    /// Finds the visible intersection: the one with the lowest
    /// non-negative `t`.
    ///
    /// Returns `None` when every intersection lies behind the ray origin.
    /// When several intersections share the lowest `t`, the first one wins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::shape::Shape;
    /// # use phong_tracer::intersect::{ Intersection, Intersections };
    /// let s = Shape::sphere();
    /// let xs = Intersections::from(vec![
    ///     Intersection::new(5.0, &s),
    ///     Intersection::new(7.0, &s),
    ///     Intersection::new(-3.0, &s),
    ///     Intersection::new(2.0, &s),
    /// ]);
    ///
    /// assert_eq!(xs.hit().map(|i| i.t), Some(2.0));
    /// ```
    pub fn hit(&self) -> Option<Intersection<'a>> {
        let mut best: Option<Intersection<'a>> = None;

        for i in self.intersections.iter() {
            if i.t < 0.0 || i.t.is_nan() {
                continue;
            }

            match best {
                Some(b) if b.t <= i.t => (),
                _ => best = Some(*i),
            }
        }

        best
    }

    /// Sorts the intersections by `t`, ignoring `f64` semantics.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }

    /// Appends the intersections of `other`, then restores the ordering.
    pub fn extend(&mut self, other: Intersections<'a>) {
        self.intersections.extend(other.intersections);
        self.sort();
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Intersection<'a>> {
        self.intersections.iter()
    }
}

/// A record for computations associated with an `Intersection`.
///
/// Mostly a superset of an `Intersection`.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub obj: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple4D,

    /// A point slightly above the intersected surface. Used to prevent an
    /// object from shadowing itself (this causes "acne").
    pub over_point: Tuple4D,

    /// The eye vector for the intersection.
    pub eyev: Tuple4D,

    /// The normal vector of the object being intersected, facing the eye.
    pub normalv: Tuple4D,

    /// Whether the intersection occurs within the object or not.
    pub inside: bool,
}

impl<'a> IntersectionComputation<'a> {
    /// Creates a new intersection computation, given a ray and intersection.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>)
        -> TraceResult<IntersectionComputation<'a>> {
        Self::with_bias(r, hit, SHADOW_BIAS)
    }

    /// Like `new`, but `over_point` is lifted off the surface by `bias`.
    pub fn with_bias(r: &Ray4D, hit: &Intersection<'a>, bias: f64)
        -> TraceResult<IntersectionComputation<'a>> {
        let t = hit.t;
        let obj = hit.what;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = obj.normal_at(point)?;

        // A normal facing away from the eye means the ray started inside.
        let inside = if normalv.dot(&eyev) < 0.0 {
            normalv = -normalv;
            true
        } else {
            false
        };

        let over_point = point + normalv * bias;

        Ok(IntersectionComputation {
            t, obj,
            point, over_point,
            eyev, normalv,
            inside,
        })
    }
}

#[cfg(test)]
use crate::matrix::Matrix4D;

#[test]
fn intersection_holds_t_and_object() {
    let s = Shape::sphere();
    let i = Intersection::new(3.5, &s);

    assert_eq!(i.t, 3.5);
    assert!(std::ptr::eq(i.what, &s));
}

#[test]
fn intersections_on_distinct_shapes_differ() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();

    assert_ne!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s2));
    assert_eq!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s1));
}

#[test]
fn hit_with_all_positive() {
    let s = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let xs = Intersections::from(vec![i2, i1]);

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_with_some_negative() {
    let s = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let xs = Intersections::from(vec![i2, i1]);

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_with_all_negative() {
    let s = Shape::sphere();
    let xs = Intersections::from(vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ]);

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative() {
    let s = Shape::sphere();
    let i4 = Intersection::new(2.0, &s);
    let xs = Intersections::from(vec![
        Intersection::new(5.0, &s),
        Intersection::new(7.0, &s),
        Intersection::new(-3.0, &s),
        i4,
    ]);

    assert_eq!(xs.hit(), Some(i4));
}

#[test]
fn hit_at_zero_counts() {
    let s = Shape::sphere();
    let xs = Intersections::from(vec![
        Intersection::new(0.0, &s),
        Intersection::new(1.0, &s),
    ]);

    assert_eq!(xs.hit().map(|i| i.t), Some(0.0));
}

#[test]
fn hit_ties_keep_first() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();
    let xs = Intersections::from(vec![
        Intersection::new(1.0, &s1),
        Intersection::new(1.0, &s2),
    ]);

    assert!(std::ptr::eq(xs.hit().unwrap().what, &s1));
}

#[test]
fn intersections_are_sorted() {
    let s = Shape::sphere();
    let mut xs = Intersections::from(vec![
        Intersection::new(3.0, &s),
        Intersection::new(-1.0, &s),
    ]);
    xs.extend(Intersections::from(vec![Intersection::new(0.5, &s)]));

    let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![-1.0, 0.5, 3.0]);
}

#[test]
fn precompute_intersection_state() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);
    let comps = i.prepare_computations(&r).unwrap();

    assert_eq!(comps.t, i.t);
    assert!(std::ptr::eq(comps.obj, &s));
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn precompute_outside_intersection() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let comps = Intersection::new(4.0, &s).prepare_computations(&r).unwrap();

    assert!(!comps.inside);
}

#[test]
fn precompute_inside_intersection() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let comps = Intersection::new(1.0, &s).prepare_computations(&r).unwrap();

    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);

    // The normal is flipped to face the eye.
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn hit_should_offset_point() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0));
    let comps = Intersection::new(5.0, &s).prepare_computations(&r).unwrap();

    assert!(comps.over_point.z < -SHADOW_BIAS / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}

#[test]
fn bias_is_configurable() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);
    let comps = IntersectionComputation::with_bias(&r, &i, 0.5).unwrap();

    assert_eq!(comps.over_point, Tuple4D::point(0.0, 0.0, -1.5));
}
