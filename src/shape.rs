use crate::consts::FEQ_EPSILON;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::light::{ Material, SharedMaterial };
use crate::matrix::Matrix4D;
use crate::intersect::{ Intersection, Intersections };
use crate::error::TraceResult;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeType {
    /// A unit sphere with its center at the object-space origin.
    Sphere,

    /// The X/Z plane, stretching indefinitely with a normal along +Y.
    Plane,
}

/// A shape placed in a world.
///
/// Every shape is defined in its own object space; `transform` takes it from
/// object space to world space. Shapes have no value equality: two default
/// spheres are two distinct objects, and intersections refer back to the
/// exact shape they hit by address.
///
/// Cloning a shape clones the `SharedMaterial` handle, so the clone shares
/// its material with the original. Assign a fresh material to break the link.
#[derive(Clone, Debug)]
pub struct Shape {
    pub ty: ShapeType,
    pub transform: Matrix4D,
    pub material: SharedMaterial,
}

impl Shape {
    fn new(ty: ShapeType) -> Shape {
        Shape {
            ty,
            transform: Matrix4D::identity(),
            material: SharedMaterial::default(),
        }
    }

    /// Creates a unit sphere with identity transform and default material.
    pub fn sphere() -> Shape {
        Shape::new(ShapeType::Sphere)
    }

    /// Creates a plane with a normal pointing up along the Y axis.
    pub fn plane() -> Shape {
        Shape::new(ShapeType::Plane)
    }

    pub fn with_transform(mut self, transform: Matrix4D) -> Shape {
        self.transform = transform;
        self
    }

    /// Gives the shape a material of its own, or a shared one when passed a
    /// clone of another shape's `SharedMaterial`.
    pub fn with_material<M: Into<SharedMaterial>>(mut self, material: M)
        -> Shape {
        self.material = material.into();
        self
    }

    /// Snapshot of the shape's current material.
    pub fn material(&self) -> Material {
        self.material.get()
    }

    /// Intersects a ray with this shape.
    ///
    /// The ray is brought into object space with the inverse of `transform`
    /// before the canonical shape is intersected. The `t` values are valid
    /// for the original (world-space) ray.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::shape::Shape;
    /// # use phong_tracer::ray::Ray4D;
    /// # use phong_tracer::tuple::Tuple4D;
    /// # fn main() -> Result<(), phong_tracer::error::TraceError> {
    /// let s = Shape::sphere();
    /// let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0),
    ///                    Tuple4D::vector(0.0, 0.0, 1.0));
    ///
    /// let xs = s.intersect(&r)?;
    /// assert_eq!(xs.len(), 2);
    /// assert_eq!(xs[0].t, 4.0);
    /// assert_eq!(xs[1].t, 6.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn intersect(&self, ray: &Ray4D) -> TraceResult<Intersections> {
        let local_ray = ray.transform(self.transform.inverse()?);
        Ok(self.local_intersect(&local_ray))
    }

    /// Intersects a ray, already in object space, with the canonical shape.
    pub fn local_intersect(&self, ray: &Ray4D) -> Intersections {
        match self.ty {
            ShapeType::Sphere => self.intersect_sphere(ray),
            ShapeType::Plane => self.intersect_plane(ray),
        }
    }

    /// Obtains the world-space surface normal at a world-space point.
    ///
    /// The point is taken to object space, the canonical normal is computed
    /// there, and the normal is mapped back with the transpose of the inverse
    /// transform so it stays perpendicular under non-uniform scaling.
    pub fn normal_at(&self, world_point: Tuple4D) -> TraceResult<Tuple4D> {
        let inv = self.transform.inverse()?;

        let object_point = inv * world_point;
        let object_normal = self.local_normal_at(&object_point);

        let mut world_normal = inv.transposition() * object_normal;
        world_normal.w = 0.0;

        Ok(world_normal.normalize())
    }

    /// Obtains the normal of the canonical shape at an object-space point.
    pub fn local_normal_at(&self, at: &Tuple4D) -> Tuple4D {
        match self.ty {
            // Sphere is centered at the origin, so the normal is the point.
            ShapeType::Sphere => Tuple4D { w: 0.0, ..*at },
            ShapeType::Plane => Tuple4D::vector(0.0, 1.0, 0.0),
        }
    }

    /// Solves the unit sphere quadratic.
    ///
    /// Yields no intersections on a miss and two otherwise, in ascending
    /// order. A tangent ray yields the same `t` twice.
    fn intersect_sphere(&self, ray: &Ray4D) -> Intersections {
        // Subtracting a point removes the 'w' part of the ray origin.
        let sphere_to_ray = ray.origin - Tuple4D::origin();

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);

        if discriminant < 0.0 {
            return Intersections::new();
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        Intersections::from(vec![
            Intersection::new(t1, self),
            Intersection::new(t2, self),
        ])
    }

    fn intersect_plane(&self, ray: &Ray4D) -> Intersections {
        // Parallel and coplanar rays both count as a miss.
        if ray.direction.y.abs() < FEQ_EPSILON {
            return Intersections::new();
        }

        let t = -ray.origin.y / ray.direction.y;
        Intersections::from(vec![Intersection::new(t, self)])
    }
}

#[cfg(test)]
fn ray_toward_z(z: f64) -> Ray4D {
    Ray4D::new(Tuple4D::point(0.0, 0.0, z), Tuple4D::vector(0.0, 0.0, 1.0))
}

#[test]
fn ray_intersects_sphere_at_two_points() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray_toward_z(-5.0)).unwrap();

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 4.0);
    assert_eq!(xs[1].t, 6.0);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let s = Shape::sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = s.intersect(&r).unwrap();

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 5.0);
    assert_eq!(xs[1].t, 5.0);
}

#[test]
fn ray_misses_sphere() {
    let s = Shape::sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 2.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert!(s.intersect(&r).unwrap().is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray_toward_z(0.0)).unwrap();

    assert_eq!(xs[0].t, -1.0);
    assert_eq!(xs[1].t, 1.0);
}

#[test]
fn sphere_is_behind_ray() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray_toward_z(5.0)).unwrap();

    assert_eq!(xs[0].t, -6.0);
    assert_eq!(xs[1].t, -4.0);
}

#[test]
fn intersections_refer_to_the_shape() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray_toward_z(-5.0)).unwrap();

    assert!(std::ptr::eq(xs[0].what, &s));
    assert!(std::ptr::eq(xs[1].what, &s));
}

#[test]
fn intersect_scaled_sphere() {
    let s = Shape::sphere().with_transform(Matrix4D::scaling(2.0, 2.0, 2.0));
    let xs = s.intersect(&ray_toward_z(-5.0)).unwrap();

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 3.0);
    assert_eq!(xs[1].t, 7.0);
}

#[test]
fn intersect_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0));

    assert!(s.intersect(&ray_toward_z(-5.0)).unwrap().is_empty());
}

#[test]
fn singular_transform_fails_to_intersect() {
    use crate::error::TraceError;

    let singular = Matrix4D::scaling(0.0, 1.0, 1.0);
    let s = Shape::sphere().with_transform(singular);

    assert_eq!(
        s.intersect(&ray_toward_z(-5.0)).unwrap_err(),
        TraceError::NonInvertible(singular)
    );
    assert!(s.normal_at(Tuple4D::point(0.0, 0.0, -1.0)).is_err());
}

#[test]
fn normal_on_sphere_axes() {
    let s = Shape::sphere();

    assert_eq!(s.normal_at(Tuple4D::point(1.0, 0.0, 0.0)),
        Ok(Tuple4D::vector(1.0, 0.0, 0.0)));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 1.0, 0.0)),
        Ok(Tuple4D::vector(0.0, 1.0, 0.0)));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Ok(Tuple4D::vector(0.0, 0.0, 1.0)));
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Tuple4D::point(k, k, k)).unwrap();

    assert_eq!(n, Tuple4D::vector(k, k, k));
    assert_eq!(n, n.normalize());
}

#[test]
fn normal_on_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0));
    let n = s.normal_at(Tuple4D::point(0.0, 1.70711, -0.70711));

    assert_eq!(n, Ok(Tuple4D::vector(0.0, 0.70711, -0.70711)));
}

#[test]
fn normal_on_transformed_sphere() {
    let s = Shape::sphere().with_transform(
        Matrix4D::scaling(1.0, 0.5, 1.0)
            * Matrix4D::rotation_z(std::f64::consts::PI / 5.0)
    );
    let k = 2.0f64.sqrt() / 2.0;
    let n = s.normal_at(Tuple4D::point(0.0, k, -k));

    assert_eq!(n, Ok(Tuple4D::vector(0.0, 0.97014, -0.24254)));
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane();
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(p.local_normal_at(&Tuple4D::point(0.0, 0.0, 0.0)), up);
    assert_eq!(p.local_normal_at(&Tuple4D::point(10.0, 0.0, -10.0)), up);
    assert_eq!(p.local_normal_at(&Tuple4D::point(-5.0, 0.0, 150.0)), up);
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 10.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert!(p.local_intersect(&r).is_empty());
}

#[test]
fn ray_coplanar_with_plane() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert!(p.local_intersect(&r).is_empty());
}

#[test]
fn ray_intersecting_plane_from_above() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(0.0, -1.0, 0.0)
    );
    let xs = p.local_intersect(&r);

    assert_eq!(xs.len(), 1);
    assert_eq!(xs[0].t, 1.0);
    assert!(std::ptr::eq(xs[0].what, &p));
}

#[test]
fn ray_intersecting_plane_from_below() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, -1.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = p.local_intersect(&r);

    assert_eq!(xs.len(), 1);
    assert_eq!(xs[0].t, 1.0);
}

#[test]
fn default_shapes_do_not_share_materials() {
    let a = Shape::sphere();
    let b = Shape::sphere();

    assert!(!a.material.ptr_eq(&b.material));

    a.material.update(|m| m.ambient = 1.0);
    assert_eq!(b.material().ambient, 0.1);
}

#[test]
fn cloned_shape_shares_material() {
    let a = Shape::sphere();
    let b = a.clone().with_transform(Matrix4D::translation(1.0, 0.0, 0.0));

    assert!(a.material.ptr_eq(&b.material));

    let c = a.clone().with_material(Material::default());
    assert!(!a.material.ptr_eq(&c.material));
}
