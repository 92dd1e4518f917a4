use super::Ray;
use nalgebra::{Rotation3, Vector3};

/// Camera extrinsics: camera-to-world rotation and the camera center in world
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    rotation: Rotation3<f64>,
    center: Vector3<f64>,
}

impl CameraPose {
    pub fn new(rotation: Rotation3<f64>, center: Vector3<f64>) -> Self {
        Self { rotation, center }
    }

    /// Camera at the world origin looking down +z
    pub fn identity() -> Self {
        Self::new(Rotation3::identity(), Vector3::zeros())
    }

    /// Place a camera at `center` with its optical axis through `target`.
    ///
    /// Camera frame is x right, y down, z forward. `up` is the world direction
    /// that should appear upward in the image. Returns None when the optical
    /// axis is degenerate or parallel to `up`.
    pub fn look_at(center: Vector3<f64>, target: Vector3<f64>, up: Vector3<f64>) -> Option<Self> {
        let forward = (target - center).try_normalize(1e-12)?;
        let right = forward.cross(&up).try_normalize(1e-12)?;
        let down = forward.cross(&right);

        let basis = nalgebra::Matrix3::from_columns(&[right, down, forward]);
        Some(Self::new(Rotation3::from_matrix_unchecked(basis), center))
    }

    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    pub fn center(&self) -> &Vector3<f64> {
        &self.center
    }

    /// Transform a camera-frame point to world
    pub fn camera_to_world(&self, point_camera: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * point_camera + self.center
    }

    /// Transform a world point to camera frame
    pub fn world_to_camera(&self, point_world: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.inverse() * (point_world - self.center)
    }

    /// World ray for a camera-frame viewing direction
    pub fn ray(&self, direction_camera: &Vector3<f64>) -> Ray {
        Ray::new(self.center, self.rotation * direction_camera)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_pose_passthrough() {
        let pose = CameraPose::identity();
        let p = Vector3::new(0.3, -0.2, 4.0);
        assert_eq!(pose.camera_to_world(&p), p);
        assert_eq!(pose.world_to_camera(&p), p);
    }

    #[test]
    fn test_world_camera_inverse() {
        let pose = CameraPose::new(
            Rotation3::from_euler_angles(0.1, -0.4, 0.25),
            Vector3::new(1.0, -2.0, 0.5),
        );
        let p = Vector3::new(0.7, 0.1, 3.0);
        let back = pose.world_to_camera(&pose.camera_to_world(&p));
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn test_look_at_points_optical_axis_at_target() {
        let center = Vector3::new(-1.0, 0.0, 0.0);
        let target = Vector3::new(0.0, 0.0, 5.0);
        let pose = CameraPose::look_at(center, target, Vector3::new(0.0, -1.0, 0.0)).unwrap();

        let ray = pose.ray(&Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(ray.origin, center);
        assert!((ray.direction - (target - center).normalize()).norm() < 1e-12);

        let in_camera = pose.world_to_camera(&target);
        assert!(in_camera.x.abs() < 1e-12);
        assert!(in_camera.y.abs() < 1e-12);
        assert!(in_camera.z > 0.0);
    }

    #[test]
    fn test_look_at_rejects_degenerate_axis() {
        let up = Vector3::new(0.0, -1.0, 0.0);
        assert!(CameraPose::look_at(Vector3::zeros(), Vector3::zeros(), up).is_none());
        assert!(CameraPose::look_at(Vector3::zeros(), Vector3::new(0.0, 3.0, 0.0), up).is_none());
    }
}
