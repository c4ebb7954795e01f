use std::fs;

use phong_tracer::canvas::ImageSink;
use phong_tracer::color::Color;
use phong_tracer::error::TraceError;
use phong_tracer::scene::Scene;
use phong_tracer::world::World;

/// The two-sphere reference world, seen head-on from z = -5.
const TWO_SPHERES: &str = r#"{
    "canvas_width": 11, "canvas_height": 11, "field_of_view": 1.5707963267948966,
    "camera_from": [0, 0, -5], "camera_to": [0, 0, 0], "camera_up": [0, 1, 0],
    "light": { "intensity": [1, 1, 1], "position": [-10, 10, -10] },
    "shapes": [
        { "type": "sphere",
          "material": { "color": [0.8, 1.0, 0.6], "diffuse": 0.7, "specular": 0.2 } },
        { "type": "sphere",
          "transform": [ { "op": "scale", "x": 0.5, "y": 0.5, "z": 0.5 } ] }
    ]
}"#;

#[test]
fn json_scene_matches_default_world() {
    let scene = Scene::from_json_str(TWO_SPHERES).unwrap();
    let image = scene.camera.render(&scene.world).unwrap();

    assert_eq!(image.read_pixel(5, 5),
        Some(Color::rgb(0.38066, 0.47583, 0.2855)));

    // The same picture as the built-in reference world.
    let reference = scene.camera.render(&World::default()).unwrap();
    assert_eq!(image, reference);
}

#[test]
fn render_parallel_and_save() {
    let scene = Scene::from_json_str(TWO_SPHERES).unwrap();
    let image = scene.camera.render_parallel(&scene.world).unwrap();

    let path = std::env::temp_dir().join("phong-tracer-two-spheres.ppm");
    image.save(&path).unwrap();

    let ppm = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(ppm, image.to_ppm());
    assert!(ppm.starts_with("P3\n11 11\n255\n"));
    assert!(ppm.lines().all(|l| l.len() <= 70));

    // The corners look past both spheres.
    assert_eq!(image.read_pixel(0, 0), Some(Color::black()));
}

#[test]
fn degenerate_shape_transform_aborts_render() {
    let json = TWO_SPHERES.replace(
        r#""op": "scale", "x": 0.5, "y": 0.5, "z": 0.5"#,
        r#""op": "scale", "x": 0.5, "y": 0, "z": 0.5"#,
    );
    let scene = Scene::from_json_str(&json).unwrap();

    match scene.camera.render(&scene.world) {
        Err(TraceError::NonInvertible(_)) => (),
        Ok(_) => panic!("render of a degenerate shape should fail"),
    }
}

#[test]
fn demo_scene_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/demo.json");
    let scene = Scene::load(std::path::Path::new(path)).unwrap();

    assert_eq!(scene.world.objects.len(), 6);

    // Both walls name the same material.
    assert!(scene.world.objects[1].material.ptr_eq(&scene.world.objects[2].material));
}
