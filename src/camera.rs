use log::{ debug, error, info };
use rayon::prelude::*;

use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::world::World;
use crate::canvas::{ Canvas, ImageSink };
use crate::error::TraceResult;

/// A camera record for generating a canvas.
///
/// This record gives a "frame" of the world. Based on camera parameters,
/// different perspectives can be produced.
///
/// The canvas sits one unit in front of the camera, at `z = -1` in camera
/// space. The size of a pixel on it is derived from the canvas dimensions
/// and the field of view, which is why those three inputs are only
/// reachable through setters.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,

    half_width: f64,
    half_height: f64,
    pixel_size: f64,

    /// A matrix describing how the world should be oriented relative to the
    /// camera (typically a view transformation).
    pub transform: Matrix4D,
}

impl Camera {
    /// Creates a camera producing an `hsize` by `vsize` image, seeing
    /// `field_of_view` radians across its wider dimension.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64,
        transform: Matrix4D) -> Camera {
        let mut camera = Camera {
            hsize,
            vsize,
            field_of_view,
            half_width: 0.0,
            half_height: 0.0,
            pixel_size: 0.0,
            transform,
        };

        camera.compute_pixel_size();
        camera
    }

    fn compute_pixel_size(&mut self) {
        let half_view = (self.field_of_view / 2.0).tan();
        let aspect = (self.hsize as f64) / (self.vsize as f64);

        if aspect >= 1.0 {
            self.half_width = half_view;
            self.half_height = half_view / aspect;
        } else {
            self.half_width = half_view * aspect;
            self.half_height = half_view;
        }

        self.pixel_size = self.half_width * 2.0 / (self.hsize as f64);
    }

    /// The horizontal size of the resultant canvas.
    pub fn hsize(&self) -> usize {
        self.hsize
    }

    /// The vertical size of the resultant canvas.
    pub fn vsize(&self) -> usize {
        self.vsize
    }

    /// The angle describing "how much" the camera can see.
    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn set_hsize(&mut self, hsize: usize) {
        self.hsize = hsize;
        self.compute_pixel_size();
    }

    pub fn set_vsize(&mut self, vsize: usize) {
        self.vsize = vsize;
        self.compute_pixel_size();
    }

    pub fn set_field_of_view(&mut self, field_of_view: f64) {
        self.field_of_view = field_of_view;
        self.compute_pixel_size();
    }

    /// Creates a ray from the camera through the center of pixel `(px, py)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::camera::Camera;
    /// # use phong_tracer::matrix::Matrix4D;
    /// # use phong_tracer::tuple::Tuple4D;
    /// # fn main() -> Result<(), phong_tracer::error::TraceError> {
    /// let c = Camera::new(201, 101, std::f64::consts::PI / 2.0,
    ///     Matrix4D::identity());
    /// let r = c.ray_for_pixel(100, 50)?;
    ///
    /// assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    /// assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, -1.0));
    /// # Ok(())
    /// # }
    /// ```
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> TraceResult<Ray4D> {
        let tr_inv = self.transform.inverse()?;
        Ok(self.ray_through(&tr_inv, px, py))
    }

    /// `ray_for_pixel`, given an already inverted camera transform.
    fn ray_through(&self, tr_inv: &Matrix4D, px: usize, py: usize) -> Ray4D {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The untransformed coordinates of the pixel in camera space; the
        // camera looks toward -z, so +x is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        // Using the camera matrix, transform the canvas point and origin,
        // computing the ray's direction vector
        let pixel = *tr_inv * Tuple4D::point(world_x, world_y, -1.0);
        let origin = *tr_inv * Tuple4D::origin();
        let direction = (pixel - origin).normalize();

        Ray4D::new(origin, direction)
    }

    /// Renders the world onto a new canvas, one pixel at a time.
    pub fn render(&self, w: &World) -> TraceResult<Canvas> {
        let mut image = Canvas::new(self.hsize, self.vsize);
        self.render_to(w, &mut image)?;

        Ok(image)
    }

    /// Renders the world into any image sink, row by row.
    ///
    /// Every pixel in `0..hsize` by `0..vsize` is written exactly once. The
    /// first failing pixel aborts the render.
    pub fn render_to<S: ImageSink>(&self, w: &World, sink: &mut S)
        -> TraceResult<()> {
        info!("rendering {}x{} image of {} object(s)",
            self.hsize, self.vsize, w.objects.len());

        let tr_inv = self.transform.inverse().map_err(|e| {
            error!("render aborted: {}", e);
            e
        })?;

        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let ray = self.ray_through(&tr_inv, x, y);
                let color = w.color_at(&ray).map_err(|e| {
                    error!("render aborted at pixel ({}, {}): {}", x, y, e);
                    e
                })?;

                sink.write_pixel(x, y, color);
            }

            debug!("finished row {}/{}", y + 1, self.vsize);
        }

        info!("render finished");
        Ok(())
    }

    /// Renders the world with rows spread over the current rayon pool.
    ///
    /// Produces exactly the canvas `render` would. Colors are computed in
    /// parallel and written to the canvas on the calling thread.
    pub fn render_parallel(&self, w: &World) -> TraceResult<Canvas> {
        info!("rendering {}x{} image of {} object(s) on {} thread(s)",
            self.hsize, self.vsize, w.objects.len(),
            rayon::current_num_threads());

        let tr_inv = self.transform.inverse().map_err(|e| {
            error!("render aborted: {}", e);
            e
        })?;

        let rows: TraceResult<Vec<Vec<Color>>> = (0..self.vsize)
            .into_par_iter()
            .map(|y| {
                (0..self.hsize)
                    .map(|x| w.color_at(&self.ray_through(&tr_inv, x, y)))
                    .collect::<TraceResult<Vec<Color>>>()
            })
            .collect();

        let rows = rows.map_err(|e| {
            error!("render aborted: {}", e);
            e
        })?;

        let mut image = Canvas::new(self.hsize, self.vsize);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, color) in row.into_iter().enumerate() {
                image.write_pixel(x, y, color);
            }
        }

        info!("render finished");
        Ok(image)
    }
}

#[cfg(test)]
fn default_world_camera(hsize: usize, vsize: usize) -> Camera {
    let from = Tuple4D::point(0.0, 0.0, -5.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    Camera::new(hsize, vsize, std::f64::consts::PI / 2.0,
        Matrix4D::view_transform(from, to, up))
}

#[test]
fn construct_camera() {
    let c = Camera::new(160, 120, std::f64::consts::PI / 2.0,
        Matrix4D::identity());

    assert_eq!(c.hsize(), 160);
    assert_eq!(c.vsize(), 120);
    assert_eq!(c.field_of_view(), std::f64::consts::PI / 2.0);
    assert_eq!(c.transform, Matrix4D::identity());
}

#[test]
fn pixel_size_horizontal_canvas() {
    let c = Camera::new(200, 125, std::f64::consts::PI / 2.0,
        Matrix4D::identity());

    assert!(crate::feq(c.pixel_size(), 0.01));
}

#[test]
fn pixel_size_vertical_canvas() {
    let c = Camera::new(125, 200, std::f64::consts::PI / 2.0,
        Matrix4D::identity());

    assert!(crate::feq(c.pixel_size(), 0.01));
}

#[test]
fn setters_recompute_pixel_size() {
    let mut c = Camera::new(100, 100, std::f64::consts::PI / 2.0,
        Matrix4D::identity());
    assert!(crate::feq(c.pixel_size(), 0.02));

    c.set_hsize(200);
    c.set_vsize(125);
    assert!(crate::feq(c.pixel_size(), 0.01));

    c.set_field_of_view(std::f64::consts::PI / 3.0);
    let expected = 2.0 * (std::f64::consts::PI / 6.0).tan() / 200.0;
    assert!(crate::feq(c.pixel_size(), expected));
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0,
        Matrix4D::identity());
    let r = c.ray_for_pixel(100, 50).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0,
        Matrix4D::identity());
    let r = c.ray_for_pixel(0, 0).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0,
        Matrix4D::rotation_y(std::f64::consts::PI / 4.0)
            * Matrix4D::translation(0.0, -2.0, 5.0));
    let r = c.ray_for_pixel(100, 50).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction,
        Tuple4D::vector(2.0f64.sqrt() / 2.0, 0.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn render_world_with_camera() {
    let w: World = Default::default();
    let c = default_world_camera(11, 11);

    let image = c.render(&w).unwrap();
    assert_eq!(image.read_pixel(5, 5),
        Some(Color::rgb(0.38066, 0.47583, 0.2855)));
}

#[test]
fn render_writes_every_pixel() {
    let w = World::empty();
    let c = default_world_camera(4, 3);

    // An empty world renders every pixel black, over a non-black canvas
    let mut image = Canvas::filled(4, 3, Color::red());
    c.render_to(&w, &mut image).unwrap();

    assert_eq!(image, Canvas::new(4, 3));
}

#[test]
fn parallel_render_matches_sequential() {
    let w: World = Default::default();
    let c = default_world_camera(21, 13);

    let sequential = c.render(&w).unwrap();
    let parallel = c.render_parallel(&w).unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn singular_camera_transform_fails_render() {
    use crate::error::TraceError;

    let w: World = Default::default();
    let singular = Matrix4D::scaling(0.0, 0.0, 0.0);
    let c = Camera::new(11, 11, std::f64::consts::PI / 2.0, singular);

    assert_eq!(c.ray_for_pixel(0, 0), Err(TraceError::NonInvertible(singular)));
    assert_eq!(c.render(&w), Err(TraceError::NonInvertible(singular)));
    assert_eq!(c.render_parallel(&w), Err(TraceError::NonInvertible(singular)));
}

#[test]
fn singular_shape_transform_fails_render() {
    use crate::shape::Shape;

    let mut w: World = Default::default();
    w.objects.push(
        Shape::sphere().with_transform(Matrix4D::scaling(1.0, 0.0, 1.0))
    );
    let c = default_world_camera(5, 5);

    assert!(c.render(&w).is_err());
    assert!(c.render_parallel(&w).is_err());
}
