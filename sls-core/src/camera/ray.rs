use nalgebra::Vector3;

/// Half-line in world space with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Create a ray, normalizing `direction`
    pub fn new(origin: Vector3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray through `origin` and `target`
    pub fn through(origin: Vector3<f64>, target: Vector3<f64>) -> Self {
        Self::new(origin, target - origin)
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f64) -> Vector3<f64> {
        self.origin + self.direction * t
    }
}
