use std::io;
use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;

use crate::color::Color;
use crate::consts::PPM_LINE_WIDTH;

/// Something a camera can render into.
///
/// Pixels are addressed by column `x` and row `y`, both zero-indexed from the
/// top-left corner.
pub trait ImageSink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Stores a color. Out-of-bounds pixels are silently ignored.
    fn write_pixel(&mut self, x: usize, y: usize, color: Color);

    /// Reads a color back, or `None` when out of bounds.
    fn read_pixel(&self, x: usize, y: usize) -> Option<Color>;
}

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. The canvas
/// stores the resultant colors for each pixel ray. Once rendering finishes,
/// the `Canvas` can be encoded as a plain (ASCII) PPM image.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,

    /// The pixels of the canvas, stored row by row.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas::filled(width, height, Color::black())
    }

    /// Creates a canvas with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Encodes the canvas as a plain PPM image.
    ///
    /// Channels are clamped to `0.0..=1.0` and scaled to `0..=255`. Every
    /// pixel row starts on a new line, and lines are wrapped so that none
    /// exceeds 70 characters.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::canvas::{ Canvas, ImageSink };
    /// # use phong_tracer::color::Color;
    /// let mut canvas = Canvas::new(2, 1);
    /// canvas.write_pixel(1, 0, Color::rgb(1.5, 0.5, -0.5));
    ///
    /// assert_eq!(canvas.to_ppm(), "P3\n2 1\n255\n0 0 0 255 128 0\n");
    /// ```
    pub fn to_ppm(&self) -> String {
        let mut out = Vec::new();

        // Writing to a Vec<u8> never fails, and only ASCII is written.
        if self.write_ppm(&mut out).is_err() {
            return String::new();
        }

        String::from_utf8_lossy(&out).into_owned()
    }

    /// Writes the PPM encoding of the canvas to `out`.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // Header: magic number, dimensions, maximum color value
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;

        if self.width == 0 {
            return Ok(());
        }

        for row in self.pixels.chunks(self.width) {
            let mut line = String::new();

            for pixel in row.iter() {
                for channel in [pixel.r, pixel.g, pixel.b].iter() {
                    let value = scale_channel(*channel).to_string();

                    // Wrap before a value would push the line past the limit
                    if !line.is_empty()
                        && line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                        writeln!(out, "{}", line)?;
                        line.clear();
                    }

                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(&value);
                }
            }

            writeln!(out, "{}", line)?;
        }

        Ok(())
    }

    /// Saves a canvas to a PPM file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()
    }
}

/// Maps a color channel to a PPM value in `0..=255`.
fn scale_channel(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

impl ImageSink for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use phong_tracer::color::Color;
    /// # use phong_tracer::canvas::{ Canvas, ImageSink };
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, purple);
    /// assert_eq!(canvas.read_pixel(4, 2), Some(purple));
    /// ```
    fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = color;
    }

    fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width(), 10);
    assert_eq!(c.height(), 20);
    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(c.read_pixel(x, y), Some(Color::black()));
        }
    }
}

#[test]
fn out_of_bounds_pixels_are_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, Color::red());
    c.write_pixel(0, 2, Color::red());

    assert_eq!(c, Canvas::new(2, 2));
    assert_eq!(c.read_pixel(2, 0), None);
}

#[test]
fn ppm_header() {
    let c = Canvas::new(5, 3);
    let ppm = c.to_ppm();
    let header: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(header, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, Color::rgb(-0.5, 0.0, 1.0));

    let ppm = c.to_ppm();
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(body, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_long_lines_are_split() {
    let c = Canvas::filled(10, 2, Color::rgb(1.0, 0.8, 0.6));

    let ppm = c.to_ppm();
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(body, vec![
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
    ]);
    assert!(body.iter().all(|l| l.len() <= PPM_LINE_WIDTH));
}

#[test]
fn ppm_ends_with_newline() {
    let c = Canvas::new(5, 3);

    assert!(c.to_ppm().ends_with('\n'));
}
