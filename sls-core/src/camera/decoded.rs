use super::{Camera, CameraModel, CameraPose, PinholeCamera, Ray};
use crate::error::{CameraError, Result};
use nalgebra::Vector3;
use ndarray::{Array2, Array3};
use tracing::debug;

/// A calibrated camera together with its decoded structured-light capture.
///
/// `correspondence[[row, col]]` holds the projector pixel index the camera
/// pixel decoded to. `colors` is the captured RGB image with shape
/// `[height, width, 3]`. Camera pixel indices are row-major: `row * width + col`.
#[derive(Debug, Clone)]
pub struct DecodedCamera {
    intrinsics: PinholeCamera,
    pose: CameraPose,
    correspondence: Array2<Option<usize>>,
    colors: Array3<u8>,
    rays: Vec<Option<Ray>>,
}

impl DecodedCamera {
    /// Build a camera from calibration and decoded capture data.
    ///
    /// World rays are computed once here for every pixel. A pixel whose ray
    /// cannot be undistorted is reported as undecoded.
    pub fn new(
        intrinsics: PinholeCamera,
        pose: CameraPose,
        correspondence: Array2<Option<usize>>,
        colors: Array3<u8>,
    ) -> Result<Self> {
        intrinsics.validate()?;

        let (width, height) = intrinsics.image_size();
        let expected = (height, width);
        if correspondence.dim() != expected {
            return Err(CameraError::CorrespondenceShape {
                expected,
                actual: correspondence.dim(),
            }
            .into());
        }
        if colors.dim() != (height, width, 3) {
            return Err(CameraError::ColorShape {
                expected: (height, width, 3),
                actual: colors.dim(),
            }
            .into());
        }

        let mut rays = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let ray = intrinsics
                    .unproject((col as f64, row as f64))
                    .ok()
                    .map(|dir| pose.ray(&dir));
                rays.push(ray);
            }
        }

        let decoded = correspondence.iter().filter(|c| c.is_some()).count();
        let unprojectable = rays.iter().filter(|r| r.is_none()).count();
        debug!(width, height, decoded, unprojectable, "decoded camera ready");

        Ok(Self {
            intrinsics,
            pose,
            correspondence,
            colors,
            rays,
        })
    }

    pub fn intrinsics(&self) -> &PinholeCamera {
        &self.intrinsics
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Image dimensions (width, height)
    pub fn image_size(&self) -> (usize, usize) {
        self.intrinsics.image_size()
    }

    /// Flat index of pixel (col, row)
    pub fn pixel_index(&self, col: usize, row: usize) -> Option<usize> {
        let (width, height) = self.image_size();
        (col < width && row < height).then_some(row * width + col)
    }

    fn row_col(&self, pixel: usize) -> (usize, usize) {
        let width = self.image_size().0;
        (pixel / width, pixel % width)
    }
}

impl Camera for DecodedCamera {
    fn pixel_count(&self) -> usize {
        self.rays.len()
    }

    fn decoded_projector_pixel(&self, pixel: usize) -> Option<usize> {
        self.rays.get(pixel)?.as_ref()?;
        let (row, col) = self.row_col(pixel);
        self.correspondence[[row, col]]
    }

    fn ray_for(&self, pixel: usize) -> Ray {
        if let Some(ray) = self.rays.get(pixel).copied().flatten() {
            return ray;
        }
        // Undistortion failed for this pixel; fall back to the distorted direction
        let (row, col) = self.row_col(pixel);
        let (fx, fy) = self.intrinsics.focal_length();
        let (cx, cy) = self.intrinsics.principal_point();
        let dir = Vector3::new((col as f64 - cx) / fx, (row as f64 - cy) / fy, 1.0);
        self.pose.ray(&dir)
    }

    fn color_at(&self, pixel: usize) -> Vector3<f64> {
        let (row, col) = self.row_col(pixel);
        Vector3::new(
            f64::from(self.colors[[row, col, 0]]),
            f64::from(self.colors[[row, col, 1]]),
            f64::from(self.colors[[row, col, 2]]),
        ) / 255.0
    }
}
