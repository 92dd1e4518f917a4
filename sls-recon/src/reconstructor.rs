//! Reconstructor capability and backend selection

use crate::config::{Backend, ReconstructorConfig};
use crate::cpu::CpuReconstructor;
use crate::point_cloud::PointCloud;
use sls_core::{Camera, Projector, Result};

/// Turns registered cameras into a point cloud.
///
/// Cameras are borrowed for `'a` and never modified. Callers must not mutate a
/// registered camera while `reconstruct` runs.
pub trait Reconstructor<'a> {
    /// Register a camera. Registration order is the camera index.
    fn add_camera(&mut self, camera: &'a dyn Camera) -> Result<()>;

    /// Triangulate every projector pixel seen by both cameras
    fn reconstruct(&mut self) -> Result<PointCloud>;

    fn projector(&self) -> &Projector;

    fn camera_count(&self) -> usize;
}

/// Construct the reconstructor selected by `config.backend`
pub fn build_reconstructor<'a>(
    config: &ReconstructorConfig,
) -> Result<Box<dyn Reconstructor<'a> + 'a>> {
    config.validate()?;
    match config.backend {
        Backend::Cpu => Ok(Box::new(CpuReconstructor::with_config(config)?)),
    }
}
