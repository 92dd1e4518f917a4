use super::{distortion::DistortionModel, CameraModel};
use crate::error::{CameraError, DistortionError};
use nalgebra::Vector3;

/// Pinhole intrinsics with optional Brown-Conrady distortion
#[derive(Debug, Clone)]
pub struct PinholeCamera {
    width: usize,
    height: usize,
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
    distortion: DistortionModel,
}

impl PinholeCamera {
    /// Create a new pinhole camera with Brown-Conrady distortion
    #[allow(clippy::too_many_arguments)]
    pub fn new_brown_conrady(
        width: usize,
        height: usize,
        fx: f64,
        fy: f64,
        cx: f64,
        cy: f64,
        k1: f64,
        k2: f64,
        k3: f64,
        p1: f64,
        p2: f64,
    ) -> Self {
        Self {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
            distortion: DistortionModel::BrownConrady { k1, k2, k3, p1, p2 },
        }
    }

    /// Create a new pinhole camera with no distortion
    pub fn new_ideal(width: usize, height: usize, fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
            distortion: DistortionModel::None,
        }
    }

    /// Reject intrinsics that cannot map pixels to rays
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.width == 0 || self.height == 0 {
            return Err(CameraError::InvalidIntrinsics(format!(
                "image size {}x{} is empty",
                self.width, self.height
            )));
        }
        if !self.fx.is_finite() || !self.fy.is_finite() || self.fx == 0.0 || self.fy == 0.0 {
            return Err(CameraError::InvalidIntrinsics(format!(
                "focal length ({}, {}) must be finite and non-zero",
                self.fx, self.fy
            )));
        }
        Ok(())
    }

    /// Get focal lengths
    pub fn focal_length(&self) -> (f64, f64) {
        (self.fx, self.fy)
    }

    /// Get principal point
    pub fn principal_point(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    pub fn distortion(&self) -> &DistortionModel {
        &self.distortion
    }
}

impl CameraModel for PinholeCamera {
    fn project(&self, point_camera: &Vector3<f64>) -> Option<(f64, f64)> {
        if point_camera.z <= 0.0 {
            return None;
        }

        let x_norm = point_camera.x / point_camera.z;
        let y_norm = point_camera.y / point_camera.z;

        let (x_dist, y_dist) = self.distortion.distort(x_norm, y_norm);

        Some((self.fx * x_dist + self.cx, self.fy * y_dist + self.cy))
    }

    fn unproject(&self, pixel: (f64, f64)) -> Result<Vector3<f64>, DistortionError> {
        let x_dist = (pixel.0 - self.cx) / self.fx;
        let y_dist = (pixel.1 - self.cy) / self.fy;

        let (x_norm, y_norm) = self.distortion.undistort(x_dist, y_dist)?;

        // Unit ray in camera frame, +z forward
        Ok(Vector3::new(x_norm, y_norm, 1.0).normalize())
    }

    fn image_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
