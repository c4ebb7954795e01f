use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fs;
use std::io;
use std::path::Path;

use log::{ debug, info };
use serde::{ Serialize, Deserialize };
use thiserror::Error;

use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::pattern::{ Pattern, PatternType };
use crate::light::{ Material, PointLight, SharedMaterial };
use crate::shape::Shape;
use crate::world::World;
use crate::camera::Camera;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A world and the camera looking at it.
#[derive(Clone, Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Builds a scene from its JSON description.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::scene::Scene;
    /// # fn main() -> Result<(), phong_tracer::scene::SceneError> {
    /// let scene = Scene::from_json_str(r#"{
    ///     "canvas_width": 20, "canvas_height": 10, "field_of_view": 1.0,
    ///     "camera_from": [0, 0, -5], "camera_to": [0, 0, 0],
    ///     "camera_up": [0, 1, 0],
    ///     "light": { "intensity": [1, 1, 1], "position": [-10, 10, -10] },
    ///     "shapes": [ { "type": "sphere" } ]
    /// }"#)?;
    ///
    /// assert_eq!(scene.camera.hsize(), 20);
    /// assert_eq!(scene.world.objects.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json_str(json: &str) -> SceneResult<Scene> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        Scene::try_from(scene_json)
    }

    /// Reads and builds a scene from a JSON file.
    pub fn load(path: &Path) -> SceneResult<Scene> {
        let json = fs::read_to_string(path)?;
        let scene = Scene::from_json_str(&json)?;

        info!("loaded scene {} ({} object(s), {}x{})", path.display(),
            scene.world.objects.len(), scene.camera.hsize(),
            scene.camera.vsize());

        Ok(scene)
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = SceneError;

    fn try_from(scene_json: SceneJson) -> SceneResult<Scene> {
        // Create the camera transform from the view parameters.
        let camera_transform = Matrix4D::view_transform(
            point(scene_json.camera_from),
            point(scene_json.camera_to),
            vector(scene_json.camera_up)
        );

        // Create the camera.
        let camera = Camera::new(
            scene_json.canvas_width,
            scene_json.canvas_height,
            scene_json.field_of_view,
            camera_transform
        );

        // Every shape naming an entry here shares that entry's material.
        let materials: BTreeMap<String, SharedMaterial> = scene_json.materials
            .into_iter()
            .map(|(name, m)| (name, Material::from(m).into()))
            .collect();

        // Create the world.
        let mut world = World::empty();
        world.light_source = PointLight::new(
            Color::from(scene_json.light.intensity),
            point(scene_json.light.position)
        );

        for (i, shape_json) in scene_json.shapes.into_iter().enumerate() {
            let shape = shape_json.build(&materials)?;
            debug!("built shape {}: {:?}", i, shape.ty);
            world.objects.push(shape);
        }

        Ok(Scene { world, camera })
    }
}

fn point(p: [f64; 3]) -> Tuple4D {
    Tuple4D::point(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Tuple4D {
    Tuple4D::vector(v[0], v[1], v[2])
}

#[derive(Serialize, Deserialize)]
pub struct SceneJson {
    canvas_width: usize,
    canvas_height: usize,
    field_of_view: f64,

    camera_from: [f64; 3],
    camera_to: [f64; 3],
    camera_up: [f64; 3],

    light: LightJson,

    #[serde(default)]
    materials: BTreeMap<String, MaterialJson>,

    shapes: Vec<ShapeJson>,
}

#[derive(Clone, Serialize, Deserialize)]
struct LightJson {
    intensity: [f64; 3],
    position: [f64; 3],
}

/// One step of a transform list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum TransformJson {
    Translate { x: f64, y: f64, z: f64 },
    Scale { x: f64, y: f64, z: f64 },
    RotateX { angle: f64 },
    RotateY { angle: f64 },
    RotateZ { angle: f64 },
    Shear { xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64 },
}

impl From<&TransformJson> for Matrix4D {
    fn from(op: &TransformJson) -> Matrix4D {
        match *op {
            TransformJson::Translate { x, y, z } => Matrix4D::translation(x, y, z),
            TransformJson::Scale { x, y, z } => Matrix4D::scaling(x, y, z),
            TransformJson::RotateX { angle } => Matrix4D::rotation_x(angle),
            TransformJson::RotateY { angle } => Matrix4D::rotation_y(angle),
            TransformJson::RotateZ { angle } => Matrix4D::rotation_z(angle),
            TransformJson::Shear { xy, xz, yx, yz, zx, zy }
                => Matrix4D::shearing(xy, xz, yx, yz, zx, zy),
        }
    }
}

/// Chains a transform list; the first step listed is applied first.
fn compose(ops: &[TransformJson]) -> Matrix4D {
    ops.iter().fold(Matrix4D::identity(), |acc, op| Matrix4D::from(op) * acc)
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShapeTypeJson {
    Sphere,
    Plane,
}

#[derive(Clone, Serialize, Deserialize)]
struct ShapeJson {
    #[serde(rename = "type")]
    ty: ShapeTypeJson,

    #[serde(default)]
    transform: Vec<TransformJson>,

    #[serde(default)]
    material: Option<MaterialRefJson>,
}

/// A material given inline, or by name from the scene's `materials`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum MaterialRefJson {
    Named(String),
    Inline(MaterialJson),
}

impl ShapeJson {
    fn build(self, materials: &BTreeMap<String, SharedMaterial>)
        -> SceneResult<Shape> {
        let shape = match self.ty {
            ShapeTypeJson::Sphere => Shape::sphere(),
            ShapeTypeJson::Plane => Shape::plane(),
        };

        let material = match self.material {
            None => SharedMaterial::default(),
            Some(MaterialRefJson::Inline(m)) => Material::from(m).into(),
            Some(MaterialRefJson::Named(name)) => match materials.get(&name) {
                Some(shared) => shared.clone(),
                None => return Err(SceneError::UnknownMaterial(name)),
            },
        };

        Ok(shape
            .with_transform(compose(&self.transform))
            .with_material(material))
    }
}

/// A material; missing fields take the `Material` defaults.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
struct MaterialJson {
    color: [f64; 3],
    ambient: f64,
    diffuse: f64,
    specular: f64,
    shininess: f64,
    pattern: Option<PatternJson>,
}

impl Default for MaterialJson {
    fn default() -> MaterialJson {
        let m = Material::default();

        MaterialJson {
            color: [m.color.r, m.color.g, m.color.b],
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
            pattern: None,
        }
    }
}

impl From<MaterialJson> for Material {
    fn from(m: MaterialJson) -> Material {
        Material {
            color: Color::from(m.color),
            pattern: m.pattern.map(Pattern::from),
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PatternTypeJson {
    Stripe,
    Gradient,
    Ring,
    Checker,
}

#[derive(Clone, Serialize, Deserialize)]
struct PatternJson {
    #[serde(rename = "type")]
    ty: PatternTypeJson,
    a: [f64; 3],
    b: [f64; 3],

    #[serde(default)]
    transform: Vec<TransformJson>,
}

impl From<PatternJson> for Pattern {
    fn from(p: PatternJson) -> Pattern {
        let ty = match p.ty {
            PatternTypeJson::Stripe => PatternType::Stripe,
            PatternTypeJson::Gradient => PatternType::Gradient,
            PatternTypeJson::Ring => PatternType::Ring,
            PatternTypeJson::Checker => PatternType::Checker,
        };

        Pattern::new(ty, Color::from(p.a), Color::from(p.b))
            .with_transform(compose(&p.transform))
    }
}

#[cfg(test)]
const TEST_SCENE: &str = r#"{
    "canvas_width": 100, "canvas_height": 50, "field_of_view": 1.047,
    "camera_from": [0, 1.5, -5], "camera_to": [0, 1, 0], "camera_up": [0, 1, 0],
    "light": { "intensity": [1, 1, 1], "position": [-10, 10, -10] },
    "materials": { "wall": { "color": [1, 0.9, 0.9], "specular": 0 } },
    "shapes": [
        { "type": "plane", "material": "wall" },
        { "type": "plane", "material": "wall",
          "transform": [ { "op": "rotate_x", "angle": 1.5707963267948966 },
                         { "op": "translate", "x": 0, "y": 0, "z": 5 } ] },
        { "type": "sphere",
          "transform": [ { "op": "translate", "x": -0.5, "y": 1, "z": 0.5 } ],
          "material": { "color": [0.1, 1, 0.5], "diffuse": 0.7,
                        "pattern": { "type": "stripe", "a": [1, 1, 1], "b": [0, 0, 0],
                                     "transform": [ { "op": "scale", "x": 0.2, "y": 0.2, "z": 0.2 } ] } } }
    ]
}"#;

#[test]
fn load_scene_from_json() {
    let scene = Scene::from_json_str(TEST_SCENE).unwrap();

    assert_eq!(scene.camera.hsize(), 100);
    assert_eq!(scene.camera.vsize(), 50);
    assert_eq!(scene.camera.field_of_view(), 1.047);
    assert_eq!(scene.world.light_source.position,
        Tuple4D::point(-10.0, 10.0, -10.0));
    assert_eq!(scene.world.objects.len(), 3);
    assert_eq!(scene.world.objects[2].transform,
        Matrix4D::translation(-0.5, 1.0, 0.5));
}

#[test]
fn named_materials_are_shared() {
    let scene = Scene::from_json_str(TEST_SCENE).unwrap();
    let floor = &scene.world.objects[0];
    let wall = &scene.world.objects[1];

    assert!(floor.material.ptr_eq(&wall.material));
    assert_eq!(floor.material().color, Color::rgb(1.0, 0.9, 0.9));
    assert_eq!(floor.material().specular, 0.0);

    // Unlisted fields keep their defaults.
    assert_eq!(floor.material().ambient, 0.1);

    floor.material.update(|m| m.color = Color::blue());
    assert_eq!(wall.material().color, Color::blue());
}

#[test]
fn inline_material_with_pattern() {
    let scene = Scene::from_json_str(TEST_SCENE).unwrap();
    let m = scene.world.objects[2].material();

    assert_eq!(m.diffuse, 0.7);
    assert_eq!(m.pattern, Some(
        Pattern::stripe(Color::white(), Color::black())
            .with_transform(Matrix4D::scaling(0.2, 0.2, 0.2))
    ));
}

#[test]
fn transforms_apply_in_listed_order() {
    let ops = vec![
        TransformJson::Translate { x: 1.0, y: 0.0, z: 0.0 },
        TransformJson::Scale { x: 2.0, y: 2.0, z: 2.0 },
    ];

    // Translated to x = 2 first, then scaled to x = 4.
    assert_eq!(compose(&ops) * Tuple4D::point(1.0, 0.0, 0.0),
        Tuple4D::point(4.0, 0.0, 0.0));
    assert_eq!(compose(&[]), Matrix4D::identity());
}

#[test]
fn unknown_material_is_an_error() {
    let json = TEST_SCENE.replace(r#""material": "wall" }"#,
        r#""material": "floor" }"#);

    match Scene::from_json_str(&json) {
        Err(SceneError::UnknownMaterial(name)) => assert_eq!(name, "floor"),
        other => panic!("expected an unknown material, got {:?}",
            other.map(|s| s.world.objects.len())),
    }
}

#[test]
fn malformed_json_is_an_error() {
    let err = Scene::from_json_str("{ \"canvas_width\": ").unwrap_err();
    assert!(matches!(err, SceneError::Json(_)));
}

#[test]
fn missing_file_is_an_error() {
    let err = Scene::load(Path::new("./no/such/scene.json")).unwrap_err();
    assert!(matches!(err, SceneError::Io(_)));
}
