use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::feq;
use crate::tuple::Tuple4D;
use crate::error::{ TraceError, TraceResult };

/// A 2x2 matrix. Only ever produced as a submatrix of a `Matrix3D`.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Matrix2D {
    data: [f64; 4],
}

impl From<[f64; 4]> for Matrix2D {
    fn from(data: [f64; 4]) -> Matrix2D {
        Matrix2D { data }
    }
}

impl Index<(usize, usize)> for Matrix2D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 2) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix2D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 2) + index.1]
    }
}

/// A 3x3 matrix. Only ever produced as a submatrix of a `Matrix4D`.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Matrix3D {
    data: [f64; 9],
}

impl From<[f64; 9]> for Matrix3D {
    fn from(data: [f64; 9]) -> Matrix3D {
        Matrix3D { data }
    }
}

impl Index<(usize, usize)> for Matrix3D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 3) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix3D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 3) + index.1]
    }
}

/// Sign of the cofactor at `(row, col)`: positive on even sums.
fn cofactor_sign(row: usize, col: usize) -> f64 {
    if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
}

impl Matrix2D {
    /// The determinant `ad - bc`.
    pub fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

impl Matrix3D {
    /// Returns the 2x2 matrix left after removing `row` and `col`.
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix2D {
        let mut buf: [f64; 4] = [0.0; 4];
        let mut count = 0;

        for r in (0..3).filter(|&r| r != row) {
            for c in (0..3).filter(|&c| c != col) {
                buf[count] = self[(r, c)];
                count += 1;
            }
        }

        Matrix2D { data: buf }
    }

    /// The determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// The minor at `row` and `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        self.minor(row, col) * cofactor_sign(row, col)
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        (0..3).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }
}

/// A 4x4 matrix.
///
/// These matrices encode every transformation in the tracer: shape
/// transforms (object to world space), pattern transforms (pattern to object
/// space) and the camera's view transform. They act on both points and
/// vectors; a translation moves points but leaves vectors alone, because a
/// vector's `w` is `0.0`.
///
/// Transforms compose right-to-left: in `c * b * a`, `a` is applied to a
/// tuple first.
///
/// # Examples
///
/// ```
/// # use phong_tracer::tuple::Tuple4D;
/// # use phong_tracer::matrix::Matrix4D;
/// let t = Matrix4D::translation(10.0, 5.0, 7.0)
///     * Matrix4D::scaling(5.0, 5.0, 5.0)
///     * Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
///
/// let p = Tuple4D::point(1.0, 0.0, 1.0);
/// assert_eq!(t * p, Tuple4D::point(15.0, 0.0, 7.0));
/// ```
#[derive(Copy, Clone, Debug, PartialOrd)]
pub struct Matrix4D {
    data: [f64; 16],
}

/// Matrices are compared element-wise, within floating point tolerance.
impl PartialEq for Matrix4D {
    fn eq(&self, other: &Matrix4D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

/// The default transform of every shape, pattern and camera is the identity.
impl Default for Matrix4D {
    fn default() -> Matrix4D {
        Matrix4D::identity()
    }
}

impl Matrix4D {
    /// Creates a new `Matrix4D` with all elements set to `0.0`.
    pub fn new() -> Matrix4D {
        Matrix4D { data: [0.0; 16] }
    }

    /// Instantiates a 4x4 identity matrix.
    pub fn identity() -> Matrix4D {
        let mut buf = [0.0; 16];
        buf[0] = 1.0; buf[5] = 1.0; buf[10] = 1.0; buf[15] = 1.0;

        Matrix4D { data: buf }
    }

    /// Offsets a point by `x`, `y` and `z`. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Scales points and vectors by `x`, `y` and `z` along each axis.
    ///
    /// A negative factor reflects across that axis.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut scale = Self::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Rotates `r` radians about the X axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::tuple::Tuple4D;
    /// # use phong_tracer::matrix::Matrix4D;
    /// let point = Tuple4D::point(0.0, 1.0, 0.0);
    /// let m = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple4D::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotates `r` radians about the Y axis.
    pub fn rotation_y(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotates `r` radians about the Z axis.
    pub fn rotation_z(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Instantiates a shearing matrix.
    ///
    /// Each parameter moves one component in proportion to another: `xy`
    /// moves `x` in proportion to `y`, `zx` moves `z` in proportion to `x`,
    /// and so on.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::tuple::Tuple4D;
    /// # use phong_tracer::matrix::Matrix4D;
    /// let point = Tuple4D::point(2.0, 3.0, 4.0);
    /// let m = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * point, Tuple4D::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4D {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Generates a view transformation.
    ///
    /// `from` is where the eye is, `to` is where it looks and `up` roughly
    /// points up. The result moves the *world* in front of an eye sitting at
    /// the origin and looking down -Z.
    pub fn view_transform(from: Tuple4D, to: Tuple4D, up: Tuple4D) -> Matrix4D {
        let forward = (to - from).normalize();
        let left = forward.cross(&up.normalize());
        let true_up = left.cross(&forward);

        let mut orientation = Matrix4D::identity();
        orientation[(0, 0)] = left.x;
        orientation[(0, 1)] = left.y;
        orientation[(0, 2)] = left.z;

        orientation[(1, 0)] = true_up.x;
        orientation[(1, 1)] = true_up.y;
        orientation[(1, 2)] = true_up.z;

        orientation[(2, 0)] = -forward.x;
        orientation[(2, 1)] = -forward.y;
        orientation[(2, 2)] = -forward.z;

        orientation * Matrix4D::translation(-from.x, -from.y, -from.z)
    }

    /// Transposes a matrix in-place.
    pub fn transpose(&mut self) {
        *self = self.transposition();
    }

    /// Produces the transpose of a matrix as a new matrix.
    ///
    /// `A^T[i][j] == A[j][i]`.
    pub fn transposition(&self) -> Matrix4D {
        let mut buf = Matrix4D::new();

        for r in 0..4 {
            for c in 0..4 {
                buf[(c, r)] = self[(r, c)];
            }
        }

        buf
    }

    /// Returns the 3x3 matrix left after removing `row` and `col`.
    ///
    /// For example, removing row `1` and column `2` of
    ///
    /// ```text
    /// | 1 0 2 0 |
    /// | 3 1 0 0 |
    /// | 1 1 1 0 |
    /// | 4 0 0 1 |
    /// ```
    ///
    /// leaves
    ///
    /// ```text
    /// | 1 0 0 |
    /// | 1 1 0 |
    /// | 4 0 1 |
    /// ```
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix3D {
        let mut buf: [f64; 9] = [0.0; 9];
        let mut count = 0;

        for r in (0..4).filter(|&r| r != row) {
            for c in (0..4).filter(|&c| c != col) {
                buf[count] = self[(r, c)];
                count += 1;
            }
        }

        Matrix3D { data: buf }
    }

    /// The determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// The minor at `row` and `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        self.minor(row, col) * cofactor_sign(row, col)
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        (0..4).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Calculates the inverse of a `Matrix4D`.
    ///
    /// The inverse is the transposed cofactor matrix divided by the
    /// determinant. A matrix with a zero determinant has no inverse and
    /// yields `TraceError::NonInvertible`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::tuple::Tuple4D;
    /// # use phong_tracer::matrix::Matrix4D;
    /// # fn main() -> Result<(), phong_tracer::error::TraceError> {
    /// let m = Matrix4D::translation(5.0, -3.0, 2.0);
    /// let p = Tuple4D::point(-3.0, 4.0, 5.0);
    /// assert_eq!(m.inverse()? * (m * p), p);
    ///
    /// assert!(Matrix4D::scaling(0.0, 1.0, 1.0).inverse().is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn inverse(&self) -> TraceResult<Matrix4D> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(TraceError::NonInvertible(*self));
        }

        let mut inv = Matrix4D::new();
        for r in 0..4 {
            for c in 0..4 {
                inv[(c, r)] = self.cofactor(r, c) / det;
            }
        }

        Ok(inv)
    }
}

impl From<[f64; 16]> for Matrix4D {
    fn from(data: [f64; 16]) -> Matrix4D {
        Matrix4D { data }
    }
}

impl Index<(usize, usize)> for Matrix4D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix4D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 4) + index.1]
    }
}

/// Multiplication between two matrices.
///
/// Matrix multiplication is not commutative; `a * b` applies `b` first.
///
/// # Examples
///
/// ```
/// # use phong_tracer::matrix::Matrix4D;
/// let m1 = Matrix4D::scaling(2.0, 3.0, 4.0);
/// let m2 = Matrix4D::scaling(4.0, 3.0, 2.0);
/// assert_eq!(m1 * m2, Matrix4D::scaling(8.0, 9.0, 8.0));
/// ```
impl Mul<Matrix4D> for Matrix4D {
    type Output = Matrix4D;

    fn mul(self, other: Matrix4D) -> Matrix4D {
        let mut res = Matrix4D::new();

        for r in 0..4 {
            for c in 0..4 {
                res[(r, c)] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)]
                    + self[(r, 3)] * other[(3, c)]
            }
        }

        res
    }
}

/// Applies a matrix to a `Tuple4D`; the tuple is a column on the right.
impl Mul<Tuple4D> for Matrix4D {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        let mut buf: [f64; 4] = Default::default();

        for (r, out) in buf.iter_mut().enumerate() {
            *out = self[(r, 0)] * other.x
                + self[(r, 1)] * other.y
                + self[(r, 2)] * other.z
                + self[(r, 3)] * other.w;
        }

        Tuple4D { x: buf[0], y: buf[1], z: buf[2], w: buf[3] }
    }
}

impl fmt::Display for Matrix4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            write!(f, "|")?;
            for c in 0..4 {
                write!(f, " {} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn multiply_matrices() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        5.0, 6.0, 7.0, 8.0,
                        9.0, 8.0, 7.0, 6.0,
                        5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix4D = [ -2.0, 1.0, 2.0,  3.0,
                         3.0, 2.0, 1.0, -1.0,
                         4.0, 3.0, 6.0,  5.0,
                         1.0, 2.0, 7.0,  8.0, ].into();

    let c: Matrix4D = [ 20.0, 22.0,  50.0,  48.0,
                        44.0, 54.0, 114.0, 108.0,
                        40.0, 58.0, 110.0, 102.0,
                        16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, c);
}

#[test]
fn multiply_by_tuple() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        2.0, 4.0, 4.0, 2.0,
                        8.0, 6.0, 4.0, 1.0,
                        0.0, 0.0, 0.0, 1.0, ].into();
    let t = Tuple4D::tuple(1.0, 2.0, 3.0, 1.0);

    assert_eq!(a * t, Tuple4D::tuple(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn identity() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 0.0, 1.0,  2.0,  4.0,
                        1.0, 2.0,  4.0,  8.0,
                        2.0, 4.0,  8.0, 16.0,
                        4.0, 8.0, 16.0, 32.0, ].into();
    let t = Tuple4D::tuple(1.0, 2.0, 3.0, 4.0);

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(i * t, t);
    assert_eq!(Matrix4D::default(), i);
}

#[test]
fn transpose() {
    let mut a: Matrix4D = [ 0.0, 9.0, 3.0, 0.0,
                            9.0, 8.0, 0.0, 8.0,
                            1.0, 8.0, 5.0, 3.0,
                            0.0, 0.0, 5.0, 8.0, ].into();

    let t: Matrix4D = [ 0.0, 9.0, 1.0, 0.0,
                        9.0, 8.0, 8.0, 0.0,
                        3.0, 0.0, 5.0, 5.0,
                        0.0, 8.0, 3.0, 8.0, ].into();

    assert_eq!(t, a.transposition());
    assert_eq!(t.transposition(), a);

    a.transpose();
    assert_eq!(a, t);
}

#[test]
fn transpose_identity() {
    let i = Matrix4D::identity();
    assert_eq!(i, i.transposition());
}

#[test]
fn mat2_determinant() {
    let a: Matrix2D = [ 1.0, 5.0,
                       -3.0, 2.0 ].into();

    assert_eq!(a.determinant(), 17.0);
}

#[test]
fn mat3_submatrix() {
    let a: Matrix3D = [  1.0, 5.0,  0.0,
                        -3.0, 2.0,  7.0,
                         0.0, 6.0, -3.0, ].into();

    let s: Matrix2D = [ -3.0, 2.0,
                         0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2), s);
}

#[test]
fn mat4_submatrix() {
    let a: Matrix4D = [ -6.0, 1.0,  1.0, 6.0,
                        -8.0, 5.0,  8.0, 6.0,
                        -1.0, 0.0,  8.0, 2.0,
                        -7.0, 1.0, -1.0, 1.0, ].into();

    let s: Matrix3D = [ -6.0,  1.0, 6.0,
                        -8.0,  8.0, 6.0,
                        -7.0, -1.0, 1.0, ].into();

    assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_cofactor() {
    let a: Matrix3D = [ 3.0,  5.0,  0.0,
                        2.0, -1.0, -7.0,
                        6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
    let a: Matrix3D = [  1.0, 2.0,  6.0,
                        -5.0, 8.0, -4.0,
                         2.0, 6.0,  4.0, ].into();

    assert_eq!(a.cofactor(0, 0), 56.0);
    assert_eq!(a.cofactor(0, 1), 12.0);
    assert_eq!(a.cofactor(0, 2), -46.0);
    assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
    let a: Matrix4D = [ -2.0, -8.0,  3.0,  5.0,
                        -3.0,  1.0,  7.0,  3.0,
                         1.0,  2.0, -9.0,  6.0,
                        -6.0,  7.0,  7.0, -9.0, ].into();

    assert_eq!(a.cofactor(0, 0), 690.0);
    assert_eq!(a.cofactor(0, 1), 447.0);
    assert_eq!(a.cofactor(0, 2), 210.0);
    assert_eq!(a.cofactor(0, 3), 51.0);
    assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn mat4_invertibility() {
    let invertible: Matrix4D = [ 6.0,  4.0, 4.0,  4.0,
                                 5.0,  5.0, 7.0,  6.0,
                                 4.0, -9.0, 3.0, -7.0,
                                 9.0,  1.0, 7.0, -6.0, ].into();

    let singular: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                                9.0,  6.0,  2.0,  6.0,
                                0.0, -5.0,  1.0, -5.0,
                                0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(invertible.determinant(), -2120.0);
    assert!(invertible.is_invertible());
    assert_eq!(singular.determinant(), 0.0);
    assert!(!singular.is_invertible());
    assert_eq!(singular.inverse(), Err(TraceError::NonInvertible(singular)));
}

#[test]
fn mat4_inverse() {
    let a: Matrix4D = [ -5.0,  2.0,  6.0, -8.0,
                         1.0, -5.0,  1.0,  8.0,
                         7.0,  7.0, -6.0, -7.0,
                         1.0, -3.0,  7.0,  4.0, ].into();

    let i: Matrix4D = [  0.21805,  0.45113,  0.24060, -0.04511,
                        -0.80827, -1.45677, -0.44361,  0.52068,
                        -0.07895, -0.22368, -0.05263,  0.19737,
                        -0.52256, -0.81391, -0.30075,  0.30639, ].into();

    let b = a.inverse().unwrap();
    assert_eq!(a.determinant(), 532.0);
    assert_eq!(a.cofactor(2, 3), -160.0);
    assert!(feq(b[(3, 2)], -160.0 / 532.0));
    assert_eq!(b, i);
}

#[test]
fn mat4_inverse_mult() {
    let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                         3.0,  8.0,  2.0, -9.0,
                        -4.0,  4.0,  4.0,  1.0,
                        -6.0,  5.0, -1.0,  1.0, ].into();

    let b: Matrix4D = [ 8.0,  2.0, 2.0, 2.0,
                        3.0, -1.0, 7.0, 0.0,
                        7.0,  0.0, 5.0, 4.0,
                        6.0, -2.0, 0.0, 5.0  ].into();

    let c = a * b;

    assert_eq!(a, c * b.inverse().unwrap());
}

#[test]
fn mat4_inverse_round_trip() {
    let m = Matrix4D::translation(1.0, -2.0, 3.0)
        * Matrix4D::rotation_y(0.7)
        * Matrix4D::shearing(0.5, 0.0, 0.2, 0.0, 0.0, 1.0)
        * Matrix4D::scaling(2.0, 0.5, 3.0);
    let inv = m.inverse().unwrap();

    for t in [
        Tuple4D::point(1.0, 2.0, 3.0),
        Tuple4D::point(-4.5, 0.0, 7.25),
        Tuple4D::vector(0.0, -1.0, 0.5),
    ].iter() {
        assert_eq!(inv * (m * *t), *t);
    }

    assert_eq!(m * inv, Matrix4D::identity());
}

#[test]
fn mat4_translation() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 1.0, 7.0));
}

#[test]
fn mat4_translation_inverse() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0).inverse().unwrap();
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(-8.0, 7.0, 3.0));
}

#[test]
fn mat4_translation_vector() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let vector = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * vector, vector);
}

#[test]
fn mat4_scaling() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);

    assert_eq!(transform * Tuple4D::point(-4.0, 6.0, 8.0),
        Tuple4D::point(-8.0, 18.0, 32.0));
    assert_eq!(transform * Tuple4D::vector(-4.0, 6.0, 8.0),
        Tuple4D::vector(-8.0, 18.0, 32.0));
}

#[test]
fn mat4_scaling_inverse() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0).inverse().unwrap();
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-2.0, 2.0, 2.0));
}

#[test]
fn mat4_scaling_reflection() {
    let transform = Matrix4D::scaling(-1.0, 1.0, 1.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple4D::point(-2.0, 3.0, 4.0));
}

#[test]
fn mat4_rotate_x() {
    let half_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
    assert_eq!(half_quarter.inverse().unwrap() * point,
        Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn mat4_rotate_y() {
    let half_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 0.0, 1.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(2.0f64.sqrt() / 2.0, 0.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_z() {
    let half_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(-1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(-2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0));
}

#[test]
fn mat4_shear_each_axis() {
    let point = Tuple4D::point(2.0, 3.0, 4.0);
    let cases = [
        (Matrix4D::shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0), (6.0, 3.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0), (2.0, 5.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0), (2.0, 7.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0), (2.0, 3.0, 6.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0), (2.0, 3.0, 7.0)),
    ];

    for (m, (x, y, z)) in cases.iter() {
        assert_eq!(*m * point, Tuple4D::point(*x, *y, *z));
    }
}

#[test]
fn transforms_applied_in_sequence() {
    let a = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix4D::scaling(5.0, 5.0, 5.0);
    let c = Matrix4D::translation(10.0, 5.0, 7.0);

    let p1 = Tuple4D::point(1.0, 0.0, 1.0);
    let p2 = a * p1;
    assert_eq!(p2, Tuple4D::point(1.0, -1.0, 0.0));
    let p3 = b * p2;
    assert_eq!(p3, Tuple4D::point(5.0, -5.0, 0.0));
    let p4 = c * p3;
    assert_eq!(p4, Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn default_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, -1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::identity(), Matrix4D::view_transform(from, to, up));
}

#[test]
fn positive_z_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, 1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up),
        Matrix4D::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Tuple4D::point(0.0, 0.0, 8.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up),
        Matrix4D::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple4D::point(1.0, 3.0, 2.0);
    let to = Tuple4D::point(4.0, -2.0, 8.0);
    let up = Tuple4D::vector(1.0, 1.0, 0.0);

    let a: Matrix4D = [ -0.50709, 0.50709,  0.67612, -2.36643,
                         0.76772, 0.60609,  0.12122, -2.82843,
                        -0.35857, 0.59761, -0.71714,  0.00000,
                         0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix4D::view_transform(from, to, up), a);
}

#[test]
fn display_rows() {
    let shown = format!("{}", Matrix4D::identity());

    assert_eq!(shown.lines().count(), 4);
    assert_eq!(shown.lines().next(), Some("| 1 | 0 | 0 | 0 |"));
}
