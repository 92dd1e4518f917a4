//! Camera models, poses and the per-pixel capability used for reconstruction

mod decoded;
mod distortion;
mod pinhole;
mod pose;
mod ray;

pub use decoded::DecodedCamera;
pub use distortion::DistortionModel;
pub use pinhole::PinholeCamera;
pub use pose::CameraPose;
pub use ray::Ray;

use crate::error::DistortionError;
use nalgebra::Vector3;

/// Intrinsic projection model
pub trait CameraModel {
    /// Project 3D point in camera frame to image coordinates
    /// Returns None if point is behind camera
    fn project(&self, point_camera: &Vector3<f64>) -> Option<(f64, f64)>;

    /// Unproject image coordinates to unit ray in camera frame
    fn unproject(&self, pixel: (f64, f64)) -> Result<Vector3<f64>, DistortionError>;

    /// Get image dimensions this camera is calibrated for
    fn image_size(&self) -> (usize, usize);
}

/// A calibrated camera that has observed the projected pattern.
///
/// Pixels are addressed by a flat index in `0..pixel_count()`. Implementations
/// are read-only for the duration of a reconstruction and may be shared across
/// worker threads.
pub trait Camera: Send + Sync {
    /// Number of addressable pixels
    fn pixel_count(&self) -> usize;

    /// Projector pixel this camera pixel decoded to, or None if undecoded
    fn decoded_projector_pixel(&self, pixel: usize) -> Option<usize>;

    /// World-space ray through the pixel
    fn ray_for(&self, pixel: usize) -> Ray;

    /// RGB color sample of the pixel
    fn color_at(&self, pixel: usize) -> Vector3<f64>;
}
