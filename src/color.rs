use std::ops::{ Add, Sub, Mul };

use crate::feq;

/// A color.
///
/// Represented with red-green-blue (RGB) values. Values are nominally in
/// `0.0..=1.0`, but lighting happily pushes them past either end; they are
/// only clamped when the image is encoded.
///
/// # Examples
///
/// ```
/// # use phong_tracer::color::Color;
/// let red = Color::red();
/// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Like `Tuple4D`, colors are compared component-wise within a small
/// tolerance.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(rgb: [f64; 3]) -> Color {
        Color { r: rgb[0], g: rgb[1], b: rgb[2] }
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black.
    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    /// The color white.
    pub fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    /// The color red.
    pub fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    /// The color green.
    pub fn green() -> Color {
        Color::rgb(0.0, 1.0, 0.0)
    }

    /// The color blue.
    pub fn blue() -> Color {
        Color::rgb(0.0, 0.0, 1.0)
    }

    /// Computes the Hadamard product of two colors.
    ///
    /// The Hadamard product multiplies each component of the two colors, and
    /// yields a new color containing those products. This is how a surface
    /// color is filtered by the color of the light hitting it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::color::Color;
    /// let yellow = Color::rgb(1.0, 1.0, 0.0);
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// assert_eq!(Color::hadamard(&yellow, &purple), Color::red());
    /// ```
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color {
            r: c1.r * c2.r,
            g: c1.g * c2.g,
            b: c1.b * c2.b,
        }
    }
}

impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
        }
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

/// Multiplies a color by a color.
///
/// For colors `c1` and `c2`, `c1 * c2` is shorthand for
/// `Color::hadamard(&c1, &c2)`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color::rgb(1.6, 0.7, 1.0));
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 - c2, Color::rgb(0.2, 0.5, 0.5));
}

#[test]
fn multiply_color_by_scalar() {
    let c = Color::rgb(0.2, 0.3, 0.4);

    assert_eq!(c * 2.0, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(2.0 * c, Color::rgb(0.4, 0.6, 0.8));
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn colors_are_not_clamped() {
    let c = Color::rgb(0.8, 0.8, 0.8) + Color::rgb(0.5, -1.0, 0.0);

    assert_eq!(c, Color::rgb(1.3, -0.2, 0.8));
}
