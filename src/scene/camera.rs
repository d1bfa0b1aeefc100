use math3d::Vector;

/// How far along its direction the camera's look-at target sits.
pub const LOOK_DISTANCE: f32 = 140.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: Vector,
    pub direction: Vector,
}

impl CameraConfig {
    /// The point the camera looks at.
    pub fn target(&self) -> Vector {
        self.position + self.direction * LOOK_DISTANCE
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            position: Vector::splat(0.0),
            direction: Vector::new(0.0, 0.0, 1.0),
        }
    }
}
