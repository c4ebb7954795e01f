use crate::consts::SHADOW_BIAS;
use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::light::{ PointLight, Material };
use crate::shape::Shape;
use crate::intersect::{ Intersections, IntersectionComputation };
use crate::error::TraceResult;

/// A world with objects and light.
///
/// Worlds collect all objects as well as light for rendering. Objects are
/// kept in insertion order, which is also the order their intersections are
/// gathered in.
#[derive(Clone, Debug)]
pub struct World {
    pub objects: Vec<Shape>,
    pub light_source: PointLight,

    /// How far shading points are lifted off a surface before casting a
    /// shadow ray.
    pub shadow_bias: f64,
}

impl Default for World {
    fn default() -> World {
        let light_source = PointLight::new(
            Color::rgb(1.0, 1.0, 1.0),
            Tuple4D::point(-10.0, 10.0, -10.0)
        );

        let s1 = Shape::sphere().with_material(Material {
            color: Color::rgb(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });

        let s2 = Shape::sphere()
            .with_transform(Matrix4D::scaling(0.5, 0.5, 0.5));

        World {
            objects: vec![s1, s2],
            light_source,
            shadow_bias: SHADOW_BIAS,
        }
    }
}

impl World {
    /// Creates a default world with two spheres.
    pub fn new() -> World {
        Default::default()
    }

    /// Creates an empty world with no objects and the default light source.
    pub fn empty() -> World {
        World {
            objects: Vec::new(),
            light_source: Default::default(),
            shadow_bias: SHADOW_BIAS,
        }
    }

    /// Gets a reference to the first object in a world.
    pub fn first(&self) -> Option<&Shape> {
        self.objects.first()
    }

    /// Gets a mutable reference to the first object in a world.
    pub fn first_mut(&mut self) -> Option<&mut Shape> {
        self.objects.first_mut()
    }

    /// Gets a reference to the second object in a world.
    pub fn second(&self) -> Option<&Shape> {
        self.objects.get(1)
    }

    /// Gets a mutable reference to the second objet in a world.
    pub fn second_mut(&mut self) -> Option<&mut Shape> {
        self.objects.get_mut(1)
    }

    /// Intersects a ray against all objects in a world.
    ///
    /// The result is sorted by `t`; intersections with equal `t` stay in the
    /// order of `objects`.
    pub fn intersect(&self, r: &Ray4D) -> TraceResult<Intersections> {
        let mut intersections = Intersections::new();
        for obj in self.objects.iter() {
            intersections.extend(obj.intersect(r)?);
        }

        Ok(intersections)
    }

    /// Determines whether a point is shadowed.
    ///
    /// A point is in shadow when some object sits between it and the light.
    /// Objects beyond the light, or behind the point, cast no shadow.
    pub fn is_shadowed(&self, p: Tuple4D) -> TraceResult<bool> {
        let v = self.light_source.position - p;
        let distance = v.magnitude();
        let direction = v.normalize();

        let r = Ray4D::new(p, direction);
        let h = self.intersect(&r)?.hit();

        Ok(match h {
            Some(i) => i.t < distance,
            None => false,
        })
    }

    /// Calculates the color for a hit, based on shadows and light.
    ///
    /// Both the shadow test and the lighting use `over_point`, so a surface
    /// never shadows itself.
    pub fn shade_hit(&self, comps: &IntersectionComputation) -> TraceResult<Color> {
        let shadowed = self.is_shadowed(comps.over_point)?;

        comps.obj.material().lighting(
            comps.obj, &self.light_source,
            comps.over_point, comps.eyev, comps.normalv,
            shadowed
        )
    }

    /// Determines a color based on the intersection of a ray and the objects.
    ///
    /// A ray that hits nothing is black.
    pub fn color_at(&self, r: &Ray4D) -> TraceResult<Color> {
        let is = self.intersect(r)?;

        // If at least one object is hit, return the color, else return black
        match is.hit() {
            None => Ok(Color::black()),
            Some(i) => {
                let comps = IntersectionComputation::with_bias(
                    r, &i, self.shadow_bias
                )?;
                self.shade_hit(&comps)
            },
        }
    }
}

#[cfg(test)]
use crate::intersect::Intersection;

#[test]
fn default_world_contents() {
    let w = World::default();

    assert_eq!(w.objects.len(), 2);
    assert_eq!(w.light_source.position, Tuple4D::point(-10.0, 10.0, -10.0));
    assert_eq!(w.first().unwrap().material().color, Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(w.second().unwrap().transform,
        Matrix4D::scaling(0.5, 0.5, 0.5));
}

#[test]
fn intersect_default_world_with_ray() {
    let w: World = Default::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let is = w.intersect(&r).unwrap();

    assert_eq!(is.len(), 4);
    assert_eq!(is[0].t, 4.0);
    assert_eq!(is[1].t, 4.5);
    assert_eq!(is[2].t, 5.5);
    assert_eq!(is[3].t, 6.0);
}

#[test]
fn shade_intersection_from_outside() {
    let w: World = Default::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    let shape = w.first().expect("Default world should contain objects.");
    let i = Intersection::new(4.0, shape);

    let comps = i.prepare_computations(&r).unwrap();
    let c = w.shade_hit(&comps);

    assert_eq!(c, Ok(Color::rgb(0.38066, 0.47583, 0.2855)));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w: World = Default::default();
    w.light_source = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 0.25, 0.0),
    );

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let shape = w.second().expect("Default world should contain objects.");
    let i = Intersection::new(0.5, shape);

    let comps = i.prepare_computations(&r).unwrap();
    let c = w.shade_hit(&comps);

    assert_eq!(c, Ok(Color::rgb(0.90498, 0.90498, 0.90498)));
}

#[test]
fn shade_intersection_in_shadow() {
    let mut w: World = World::empty();
    w.light_source = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple4D::point(0.0, 0.0, -10.0),
    );

    w.objects.push(Shape::sphere());
    w.objects.push(
        Shape::sphere().with_transform(Matrix4D::translation(0.0, 0.0, 10.0))
    );

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let i = Intersection::new(4.0, w.second().unwrap());
    let comps = i.prepare_computations(&r).unwrap();
    let c = w.shade_hit(&comps);

    assert_eq!(c, Ok(Color::rgb(0.1, 0.1, 0.1)));
}

#[test]
fn color_ray_miss() {
    let w: World = Default::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(w.color_at(&r), Ok(Color::black()));
}

#[test]
fn color_ray_hit() {
    let w: World = Default::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    assert_eq!(w.color_at(&r), Ok(Color::rgb(0.38066, 0.47583, 0.2855)));
}

#[test]
fn color_behind_ray() {
    let mut w: World = Default::default();
    w.first_mut().unwrap().material.update(|m| m.ambient = 1.0);
    w.second_mut().unwrap().material.update(|m| m.ambient = 1.0);

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.75),
        Tuple4D::vector(0.0, 0.0, -1.0)
    );

    let inner_color = w.second().unwrap().material().color;
    assert_eq!(w.color_at(&r), Ok(inner_color));
}

#[test]
fn shadow_collinear_point_and_light() {
    let w: World = Default::default();
    let p = Tuple4D::point(0.0, 10.0, 0.0);

    assert_eq!(w.is_shadowed(p), Ok(false));
}

#[test]
fn shadow_light_between_point_and_spheres() {
    let w: World = Default::default();
    let p = Tuple4D::point(10.0, -10.0, 10.0);

    assert_eq!(w.is_shadowed(p), Ok(true));
}

#[test]
fn shadow_object_behind_light() {
    let w: World = Default::default();
    let p = Tuple4D::point(-20.0, 20.0, -20.0);

    assert_eq!(w.is_shadowed(p), Ok(false));
}

#[test]
fn shadow_object_behind_point() {
    let w: World = Default::default();
    let p = Tuple4D::point(-2.0, 2.0, -2.0);

    assert_eq!(w.is_shadowed(p), Ok(false));
}

#[test]
fn shared_material_changes_every_alias() {
    let mut w: World = Default::default();
    let shared = w.objects[0].material.clone();
    w.objects[1].material = shared;

    w.first().unwrap().material.update(|m| m.color = Color::red());

    assert_eq!(w.second().unwrap().material().color, Color::red());
}

#[test]
fn singular_transform_fails_color_at() {
    use crate::error::TraceError;

    let mut w: World = Default::default();
    let singular = Matrix4D::scaling(1.0, 1.0, 0.0);
    w.objects.push(Shape::plane().with_transform(singular));

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    assert_eq!(w.color_at(&r), Err(TraceError::NonInvertible(singular)));
}
