use std::ops::Mul;

use glam::{Mat4, Vec4};

use super::{radians, Vector};

/// A 4x4 matrix, used for transforms.
///
/// Matrices act on column vectors, but multiplication is written in the
/// order the transforms are applied: `a * b` first applies `a`, then `b`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4x4(pub Mat4);

impl Matrix4x4 {
    /// Creates a new identity matrix
    #[inline]
    pub fn new() -> Matrix4x4 {
        Matrix4x4(Mat4::IDENTITY)
    }

    /// Creates a new matrix with the specified values:
    /// a b c d
    /// e f g h
    /// i j k l
    /// m n o p
    #[inline]
    #[allow(clippy::many_single_char_names)]
    #[allow(clippy::too_many_arguments)]
    pub fn new_from_values(
        a: f32,
        b: f32,
        c: f32,
        d: f32,
        e: f32,
        f: f32,
        g: f32,
        h: f32,
        i: f32,
        j: f32,
        k: f32,
        l: f32,
        m: f32,
        n: f32,
        o: f32,
        p: f32,
    ) -> Matrix4x4 {
        Matrix4x4(Mat4::from_cols(
            Vec4::new(a, e, i, m),
            Vec4::new(b, f, j, n),
            Vec4::new(c, g, k, o),
            Vec4::new(d, h, l, p),
        ))
    }

    /// Creates a matrix from four rows.
    #[inline]
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Matrix4x4 {
        Matrix4x4(Mat4::from_cols_array_2d(&rows).transpose())
    }

    /// Returns the matrix as four rows.
    #[inline]
    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        self.0.transpose().to_cols_array_2d()
    }

    #[inline]
    pub fn from_translation(t: Vector) -> Matrix4x4 {
        Matrix4x4(Mat4::from_translation(t.co))
    }

    #[inline]
    pub fn from_scale(s: Vector) -> Matrix4x4 {
        Matrix4x4(Mat4::from_scale(s.co))
    }

    /// Rotation about the x axis, in radians.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Matrix4x4 {
        Matrix4x4(Mat4::from_rotation_x(angle))
    }

    /// Rotation about the y axis, in radians.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Matrix4x4 {
        Matrix4x4(Mat4::from_rotation_y(angle))
    }

    /// Rotation about the z axis, in radians.
    #[inline]
    pub fn from_rotation_z(angle: f32) -> Matrix4x4 {
        Matrix4x4(Mat4::from_rotation_z(angle))
    }

    /// Composes translation, Euler rotation (in degrees) and scale into a
    /// single matrix.
    ///
    /// The translation is applied first, then the rotations about x, y and
    /// z in that order, and finally the scale.
    pub fn from_translation_rotation_scale(
        translation: Vector,
        rotation_degrees: Vector,
        scale: Vector,
    ) -> Matrix4x4 {
        Matrix4x4::from_translation(translation)
            * Matrix4x4::from_rotation_x(radians(rotation_degrees.x()))
            * Matrix4x4::from_rotation_y(radians(rotation_degrees.y()))
            * Matrix4x4::from_rotation_z(radians(rotation_degrees.z()))
            * Matrix4x4::from_scale(scale)
    }

    /// Returns the translation part of the matrix.
    #[inline]
    pub fn translation(&self) -> Vector {
        Vector {
            co: self.0.w_axis.truncate(),
        }
    }

    /// Returns whether the matrices are approximately equal to each other.
    /// Each corresponding element in the matrices cannot differ by more
    /// than epsilon.
    #[inline]
    pub fn aprx_eq(&self, other: Matrix4x4, epsilon: f32) -> bool {
        self.0.abs_diff_eq(other.0, epsilon)
    }

    /// Returns the transpose of the matrix
    #[inline]
    pub fn transposed(&self) -> Matrix4x4 {
        Matrix4x4(self.0.transpose())
    }

    /// Returns the inverse of the Matrix
    #[inline]
    pub fn inverse(&self) -> Matrix4x4 {
        Matrix4x4(self.0.inverse())
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::new()
    }
}

/// Multiply two matrices together
impl Mul for Matrix4x4 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self(other.0.mul_mat4(&self.0))
    }
}
