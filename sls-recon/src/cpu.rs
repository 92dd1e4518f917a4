//! CPU reconstruction over camera pairs

use crate::buckets::BucketTable;
use crate::config::ReconstructorConfig;
use crate::intersect::{Intersection, RayIntersector};
use crate::point_cloud::{Point, PointCloud};
use crate::reconstructor::Reconstructor;
use rayon::prelude::*;
use sls_core::{Camera, Projector, ReconstructionError, Result};
use tracing::{debug, info, trace, warn};

/// Reconstructs points from exactly two cameras.
///
/// Owns its projector grid and bucket table. Buckets are rebuilt on every
/// [`reconstruct`](Reconstructor::reconstruct) so camera data changes between
/// calls are picked up.
pub struct CpuReconstructor<'a> {
    projector: Projector,
    cameras: Vec<&'a dyn Camera>,
    buckets: BucketTable,
    intersector: RayIntersector,
    parallel: bool,
}

impl<'a> CpuReconstructor<'a> {
    /// Cameras taking part in one triangulated point
    pub const MAX_CAMERAS: usize = 2;

    /// Reconstructor for a `projector_width x projector_height` pattern with
    /// default settings
    pub fn new(projector_width: usize, projector_height: usize) -> Result<Self> {
        Self::with_config(&ReconstructorConfig::new(projector_width, projector_height))
    }

    pub fn with_config(config: &ReconstructorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            projector: config.projector()?,
            cameras: Vec::with_capacity(Self::MAX_CAMERAS),
            buckets: BucketTable::new(),
            intersector: config.intersector(),
            parallel: config.parallel,
        })
    }

    pub fn buckets(&self) -> &BucketTable {
        &self.buckets
    }

    pub fn intersector(&self) -> &RayIntersector {
        &self.intersector
    }

    /// Reset the bucket table to one empty bucket per projector pixel per camera
    pub fn init_buckets(&mut self) {
        self.buckets.init(self.cameras.len(), &self.projector);
    }

    /// Assign each decoded camera pixel to its projector pixel's bucket
    pub fn generate_buckets(&mut self) -> Result<()> {
        self.buckets.generate(&self.cameras, &self.projector)
    }

    /// Intersect one projector pixel's buckets from two registered cameras.
    /// Uses the buckets from the last [`generate_buckets`](Self::generate_buckets).
    pub fn intersection_of_bucket(
        &self,
        first: usize,
        second: usize,
        projector_pixel: usize,
    ) -> Option<Intersection> {
        self.intersector.intersect_bucket(
            &self.buckets,
            &self.cameras,
            first,
            second,
            projector_pixel,
        )
    }

    fn triangulate(&self, projector_pixel: usize) -> Option<Point> {
        let hit = self.intersection_of_bucket(0, 1, projector_pixel);
        if hit.is_none() && self.buckets.is_shared(0, 1, projector_pixel) {
            trace!(projector_pixel, "all ray pairs degenerate");
        }
        hit.map(|h| Point::new(projector_pixel, h.position, h.color))
    }
}

impl<'a> Reconstructor<'a> for CpuReconstructor<'a> {
    fn add_camera(&mut self, camera: &'a dyn Camera) -> Result<()> {
        if self.cameras.len() >= Self::MAX_CAMERAS {
            warn!(
                registered = self.cameras.len(),
                "rejecting camera beyond supported pair"
            );
            return Err(ReconstructionError::TooManyCameras {
                max: Self::MAX_CAMERAS,
            }
            .into());
        }
        self.cameras.push(camera);
        debug!(
            camera = self.cameras.len() - 1,
            pixels = camera.pixel_count(),
            "camera registered"
        );
        Ok(())
    }

    fn reconstruct(&mut self) -> Result<PointCloud> {
        if self.cameras.len() < Self::MAX_CAMERAS {
            return Err(ReconstructionError::NotEnoughCameras {
                registered: self.cameras.len(),
            }
            .into());
        }

        let _span = tracing::info_span!(
            "reconstruct",
            width = self.projector.width(),
            height = self.projector.height()
        )
        .entered();
        info!(
            cameras = self.cameras.len(),
            strategy = ?self.intersector.strategy(),
            parallel = self.parallel,
            "starting reconstruction"
        );

        self.init_buckets();
        self.generate_buckets()?;

        let count = self.projector.pixel_count();
        let points: Vec<Point> = if self.parallel {
            (0..count)
                .into_par_iter()
                .filter_map(|idx| self.triangulate(idx))
                .collect()
        } else {
            (0..count).filter_map(|idx| self.triangulate(idx)).collect()
        };

        info!(points = points.len(), "reconstruction complete");
        Ok(PointCloud::new(points))
    }

    fn projector(&self) -> &Projector {
        &self.projector
    }

    fn camera_count(&self) -> usize {
        self.cameras.len()
    }
}
