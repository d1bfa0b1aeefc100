use std::cmp::PartialEq;

use glam::Vec4;

/// A four-component vector.  Mostly used for RGBA colors.
#[derive(Debug, Copy, Clone, Default)]
pub struct Vector4 {
    pub co: Vec4,
}

impl Vector4 {
    #[inline(always)]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Vector4 {
        Vector4 {
            co: Vec4::new(x, y, z, w),
        }
    }

    #[inline(always)]
    pub fn splat(n: f32) -> Vector4 {
        Vector4 { co: Vec4::splat(n) }
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
    pub fn w(&self) -> f32 {
        self.co.w
    }

    #[inline(always)]
    pub fn to_array(&self) -> [f32; 4] {
        self.co.to_array()
    }
}

impl PartialEq for Vector4 {
    #[inline(always)]
    fn eq(&self, other: &Vector4) -> bool {
        self.co == other.co
    }
}

impl From<[f32; 4]> for Vector4 {
    #[inline(always)]
    fn from(a: [f32; 4]) -> Vector4 {
        Vector4::new(a[0], a[1], a[2], a[3])
    }
}
