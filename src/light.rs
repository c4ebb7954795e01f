use std::sync::{ Arc, PoisonError, RwLock, RwLockWriteGuard };

use crate::color::Color;
use crate::pattern::Pattern;
use crate::tuple::Tuple4D;
use crate::shape::Shape;
use crate::error::TraceResult;

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple4D,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: Color, mut position: Tuple4D) -> PointLight {
        if !position.is_point() {
            position.w = 1.0;
        }

        PointLight { intensity, position }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient, diffuse,
/// specular and shininess. When `pattern` is set it replaces `color` as the
/// surface color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub pattern: Option<Pattern>,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::rgb(1.0, 1.0, 1.0),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
        }
    }
}

impl Material {
    /// Calculates the color of a point lit by `light`, seen along `eyev`.
    ///
    /// `obj` is the shape the point lies on; it is only consulted to bring
    /// the point into pattern space. If the point is in a shadow (parameter
    /// `in_shadow`), only ambient light is used. The result is not clamped.
    pub fn lighting(&self, obj: &Shape, light: &PointLight, point: Tuple4D,
        eyev: Tuple4D, normalv: Tuple4D, in_shadow: bool) -> TraceResult<Color> {
        // If this material has some pattern, use that for color
        let color = match self.pattern {
            Some(ref pat) => pat.pattern_at_object(obj, point)?,
            None => self.color,
        };

        // Combine surface color with light's color
        let effective_color = color * light.intensity;
        let ambient = effective_color * self.ambient;

        // If the point is in a shadow, only calculate ambient light
        if in_shadow {
            return Ok(ambient);
        }

        let lightv = (light.position - point).normalize();

        // A negative cosine puts the light on the other side of the surface
        let light_dot_normal = lightv.dot(&normalv);
        if light_dot_normal < 0.0 {
            return Ok(ambient);
        }

        let diffuse = effective_color * self.diffuse * light_dot_normal;

        let reflectv = (-lightv).reflect(&normalv);
        let reflect_dot_eye = reflectv.dot(&eyev);

        // Light reflecting away from the eye has no highlight
        let specular = if reflect_dot_eye > 0.0 {
            let factor = reflect_dot_eye.powf(self.shininess);
            light.intensity * self.specular * factor
        } else {
            Color::black()
        };

        Ok(ambient + diffuse + specular)
    }
}

/// A material shared between shapes.
///
/// Cloning a `SharedMaterial` yields another handle to the *same* material,
/// so a change made through one shape shows up on every shape holding a
/// clone. Use `SharedMaterial::new` (or `Material::into`) to start a fresh,
/// unshared material.
///
/// # Examples
///
/// ```
/// # use phong_tracer::shape::Shape;
/// # use phong_tracer::light::Material;
/// let mut left = Shape::sphere();
/// let mut right = Shape::plane();
/// right.material = left.material.clone();
///
/// left.material.update(|m| m.ambient = 1.0);
/// assert_eq!(right.material.get().ambient, 1.0);
///
/// // Assigning a new material breaks the link again.
/// left.material = Material::default().into();
/// assert_eq!(right.material.get().ambient, 1.0);
/// assert_eq!(left.material.get().ambient, 0.1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedMaterial(Arc<RwLock<Material>>);

impl SharedMaterial {
    pub fn new(material: Material) -> SharedMaterial {
        SharedMaterial(Arc::new(RwLock::new(material)))
    }

    /// Returns a snapshot of the material.
    pub fn get(&self) -> Material {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the material for every shape sharing it.
    pub fn set(&self, material: Material) {
        *self.write() = material;
    }

    /// Edits the material in place for every shape sharing it.
    pub fn update<F: FnOnce(&mut Material)>(&self, f: F) {
        f(&mut *self.write());
    }

    /// Whether two handles refer to the same material.
    pub fn ptr_eq(&self, other: &SharedMaterial) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // Material is plain data, so a panic mid-edit cannot leave it
    // inconsistent; recover the guard from a poisoned lock.
    fn write(&self) -> RwLockWriteGuard<'_, Material> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Material> for SharedMaterial {
    fn from(material: Material) -> SharedMaterial {
        SharedMaterial::new(material)
    }
}

#[cfg(test)]
fn lighting_setup(light_position: Tuple4D, eyev: Tuple4D) -> Color {
    let s = Shape::sphere();
    let m = s.material.get();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(Color::white(), light_position);

    m.lighting(&s, &light, position, eyev, normalv, false).unwrap()
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::rgb(1.0, 1.0, 1.0));
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.pattern, None);
}

#[test]
fn point_light_has_position_and_intensity() {
    let light = PointLight::new(Color::white(), Tuple4D::vector(1.0, 2.0, 3.0));

    assert_eq!(light.intensity, Color::white());
    assert_eq!(light.position, Tuple4D::point(1.0, 2.0, 3.0));
}

#[test]
fn eye_between_light_and_surface() {
    let res = lighting_setup(
        Tuple4D::point(0.0, 0.0, -10.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
    );

    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let res = lighting_setup(
        Tuple4D::point(0.0, 0.0, -10.0),
        Tuple4D::vector(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0),
    );

    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_light_offset_45() {
    let res = lighting_setup(
        Tuple4D::point(0.0, 10.0, -10.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
    );

    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let res = lighting_setup(
        Tuple4D::point(0.0, 10.0, -10.0),
        Tuple4D::vector(0., -(2.0f64.sqrt()) / 2., -(2.0f64.sqrt()) / 2.),
    );

    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let res = lighting_setup(
        Tuple4D::point(0.0, 0.0, 10.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
    );

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let s = Shape::sphere();
    let m = Material::default();
    let light = PointLight::new(
        Color::white(), Tuple4D::point(0.0, 0.0, -10.0)
    );

    let res = m.lighting(&s, &light, Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, -1.0), Tuple4D::vector(0.0, 0.0, -1.0),
        true);

    assert_eq!(res, Ok(Color::rgb(0.1, 0.1, 0.1)));
}

#[test]
fn lighting_with_stripe_pattern() {
    let m = Material {
        color: Color::rgb(0.5, 0.5, 0.5),
        pattern: Some(Pattern::stripe(Color::white(), Color::black())),

        // Only ambient light, so the pattern color comes through as-is
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        ..Default::default()
    };

    let s = Shape::sphere();
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::white(), Tuple4D::point(0.0, 0.0, -10.0)
    );

    assert_eq!(
        m.lighting(&s, &light, Tuple4D::point(0.9, 0.0, 0.0),
            eyev, normalv, false),
        Ok(Color::white())
    );

    assert_eq!(
        m.lighting(&s, &light, Tuple4D::point(1.1, 0.0, 0.0),
            eyev, normalv, false),
        Ok(Color::black())
    );
}

#[test]
fn lighting_is_filtered_by_light_color() {
    let s = Shape::sphere();
    let m = Material { specular: 0.0, ..Default::default() };
    let light = PointLight::new(
        Color::rgb(1.0, 0.5, 0.0), Tuple4D::point(0.0, 0.0, -10.0)
    );

    let res = m.lighting(&s, &light, Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, -1.0), Tuple4D::vector(0.0, 0.0, -1.0),
        false);

    assert_eq!(res, Ok(Color::rgb(1.0, 0.5, 0.0)));
}

#[test]
fn shared_material_propagates_changes() {
    let a = SharedMaterial::new(Material::default());
    let b = a.clone();
    let c: SharedMaterial = Material::default().into();

    a.update(|m| m.diffuse = 0.25);
    b.set(Material { color: Color::red(), ..b.get() });

    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&c));
    assert_eq!(a.get().color, Color::red());
    assert_eq!(b.get().diffuse, 0.25);
    assert_eq!(c.get(), Material::default());
}
