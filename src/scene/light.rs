use bytemuck::{Pod, Zeroable};

use math3d::{cross, Vector};

/// An emitting parallelogram spanned by two edges from a corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParallelogramLight {
    pub corner: Vector,
    pub v1: Vector,
    pub v2: Vector,
    pub emission: Vector,
    normal: Vector,
}

impl ParallelogramLight {
    pub fn new(corner: Vector, v1: Vector, v2: Vector, emission: Vector) -> ParallelogramLight {
        ParallelogramLight {
            corner: corner,
            v1: v1,
            v2: v2,
            emission: emission,
            normal: cross(v1, v2).normalized(),
        }
    }

    /// Unit normal of the emitting side, `normalize(v1 x v2)`.  Zero if the
    /// edges are parallel or degenerate.
    #[inline]
    pub fn normal(&self) -> Vector {
        self.normal
    }

    #[inline]
    pub fn area(&self) -> f32 {
        cross(self.v1, self.v2).length()
    }

    pub fn record(&self) -> LightRecord {
        LightRecord {
            corner: self.corner.to_array(),
            v1: self.v1.to_array(),
            v2: self.v2.to_array(),
            normal: self.normal.to_array(),
            emission: self.emission.to_array(),
            _pad: 0.0,
        }
    }
}

/// GPU layout of a parallelogram light.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LightRecord {
    pub corner: [f32; 3],
    pub v1: [f32; 3],
    pub v2: [f32; 3],
    pub normal: [f32; 3],
    pub emission: [f32; 3],
    pub _pad: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_of_xy_square() {
        let light = ParallelogramLight::new(
            Vector::splat(0.0),
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
            Vector::splat(1.0),
        );
        assert_eq!(light.normal(), Vector::new(0.0, 0.0, 1.0));
        assert_eq!(light.area(), 1.0);
    }

    #[test]
    fn normal_is_unit_length() {
        let light = ParallelogramLight::new(
            Vector::new(-1.0, 5.0, 2.0),
            Vector::new(4.0, 0.0, 0.0),
            Vector::new(0.0, 0.0, 3.0),
            Vector::splat(10.0),
        );
        assert!((light.normal().length() - 1.0).abs() < 0.000001);
        assert!(light
            .normal()
            .aprx_eq(Vector::new(0.0, -1.0, 0.0), 0.000001));
        assert_eq!(light.area(), 12.0);
    }

    #[test]
    fn degenerate_edges_give_zero_normal() {
        let light = ParallelogramLight::new(
            Vector::splat(0.0),
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(2.0, 0.0, 0.0),
            Vector::splat(1.0),
        );
        assert_eq!(light.normal(), Vector::splat(0.0));
    }

    #[test]
    fn record_layout() {
        assert_eq!(std::mem::size_of::<LightRecord>(), 64);
        let light = ParallelogramLight::new(
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
            Vector::new(5.0, 5.0, 5.0),
        );
        let rec = light.record();
        assert_eq!(rec.corner, [1.0, 2.0, 3.0]);
        assert_eq!(rec.normal, [0.0, 0.0, 1.0]);
        assert_eq!(rec.emission, [5.0, 5.0, 5.0]);
    }
}
