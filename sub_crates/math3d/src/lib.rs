mod matrix;
mod vector;
mod vector4;

pub use self::matrix::Matrix4x4;
pub use self::vector::Vector;
pub use self::vector4::Vector4;

/// Trait for calculating cross products.
pub trait CrossProduct {
    fn cross(self, other: Self) -> Self;
}

#[inline]
pub fn cross<T: CrossProduct>(a: T, b: T) -> T {
    a.cross(b)
}

/// Converts degrees to radians.
#[inline(always)]
pub fn radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}
