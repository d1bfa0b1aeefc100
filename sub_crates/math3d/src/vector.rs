use std::{
    cmp::PartialEq,
    ops::{Add, Mul, Sub},
};

use glam::Vec3;

use super::{CrossProduct, Matrix4x4};

/// A three-component vector.  Used for positions, directions and colors
/// alike, since the scene tables don't distinguish between them.
#[derive(Debug, Copy, Clone, Default)]
pub struct Vector {
    pub co: Vec3,
}

impl Vector {
    pub const ZERO: Vector = Vector { co: Vec3::ZERO };

    #[inline(always)]
    pub fn new(x: f32, y: f32, z: f32) -> Vector {
        Vector {
            co: Vec3::new(x, y, z),
        }
    }

    #[inline(always)]
    pub fn splat(n: f32) -> Vector {
        Vector { co: Vec3::splat(n) }
    }

    #[inline(always)]
    pub fn length(&self) -> f32 {
        self.co.length()
    }

    /// Returns the unit-length version of the vector, or the zero vector
    /// if the vector is too short to normalize.
    #[inline(always)]
    pub fn normalized(&self) -> Vector {
        Vector {
            co: self.co.normalize_or_zero(),
        }
    }

    #[inline(always)]
    pub fn x(&self) -> f32 {
        self.co.x
    }

    #[inline(always)]
    pub fn y(&self) -> f32 {
        self.co.y
    }

    #[inline(always)]
    pub fn z(&self) -> f32 {
        self.co.z
    }

    #[inline(always)]
    pub fn to_array(&self) -> [f32; 3] {
        self.co.to_array()
    }

    #[inline]
    pub fn aprx_eq(&self, other: Vector, epsilon: f32) -> bool {
        self.co.abs_diff_eq(other.co, epsilon)
    }
}

impl PartialEq for Vector {
    #[inline(always)]
    fn eq(&self, other: &Vector) -> bool {
        self.co == other.co
    }
}

impl From<[f32; 3]> for Vector {
    #[inline(always)]
    fn from(a: [f32; 3]) -> Vector {
        Vector::new(a[0], a[1], a[2])
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline(always)]
    fn add(self, other: Vector) -> Vector {
        Vector {
            co: self.co + other.co,
        }
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline(always)]
    fn sub(self, other: Vector) -> Vector {
        Vector {
            co: self.co - other.co,
        }
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    #[inline(always)]
    fn mul(self, other: f32) -> Vector {
        Vector {
            co: self.co * other,
        }
    }
}

/// Transforms the vector as a point (w = 1).
impl Mul<Matrix4x4> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, other: Matrix4x4) -> Vector {
        Vector {
            co: other.0.transform_point3(self.co),
        }
    }
}

impl CrossProduct for Vector {
    #[inline]
    fn cross(self, other: Vector) -> Vector {
        Vector {
            co: self.co.cross(other.co),
        }
    }
}
