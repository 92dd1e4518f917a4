//! Projector-pixel buckets of camera pixels.
//!
//! For every registered camera, each projector pixel owns the list of camera
//! pixels that decoded to it:
//!
//! ```text
//! projector pixel (bucket)   camera pixels
//! +-------------------+      +----+----+----+
//! |         0         | ---> | 12 | 13 | 40 |
//! +-------------------+      +----+----+----+
//! |         1         | ---> | 14 |
//! +-------------------+      +----+
//! ```
//!
//! Pixels in the same bucket of two different cameras are correspondences.

use sls_core::{Camera, Projector, ReconstructionError, Result};
use tracing::debug;

/// `buckets[camera][projector_pixel]` = ascending camera pixel indices
#[derive(Debug, Clone, Default)]
pub struct BucketTable {
    buckets: Vec<Vec<Vec<usize>>>,
    projector_pixels: usize,
}

impl BucketTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate one empty bucket per projector pixel for each camera,
    /// discarding anything held before.
    pub fn init(&mut self, camera_count: usize, projector: &Projector) {
        self.projector_pixels = projector.pixel_count();
        self.buckets = vec![vec![Vec::new(); self.projector_pixels]; camera_count];
    }

    /// Rebuild all buckets from the cameras' decoded correspondences.
    ///
    /// Reuses the table from [`init`](Self::init) when it already matches the
    /// camera count and projector size, otherwise allocates it. Previous
    /// contents are cleared either way.
    ///
    /// Undecoded pixels are skipped. A decoded index outside the projector grid
    /// is not treated as undecoded: the camera and projector disagree on the
    /// pattern size, which is a configuration error like too few cameras. The
    /// table is left empty in that case.
    pub fn generate(&mut self, cameras: &[&dyn Camera], projector: &Projector) -> Result<()> {
        if self.buckets.len() != cameras.len() || self.projector_pixels != projector.pixel_count()
        {
            self.init(cameras.len(), projector);
        } else {
            self.clear();
        }

        for (cam_idx, camera) in cameras.iter().enumerate() {
            if let Err(err) = self.fill(cam_idx, *camera) {
                self.clear();
                return Err(err);
            }
        }

        Ok(())
    }

    fn fill(&mut self, cam_idx: usize, camera: &dyn Camera) -> Result<()> {
        let count = self.projector_pixels;
        let table = &mut self.buckets[cam_idx];
        let mut assigned = 0usize;

        for pixel in 0..camera.pixel_count() {
            let Some(index) = camera.decoded_projector_pixel(pixel) else {
                continue;
            };
            let bucket = table
                .get_mut(index)
                .ok_or(ReconstructionError::ProjectorPixelOutOfRange {
                    camera: cam_idx,
                    pixel,
                    index,
                    count,
                })?;
            bucket.push(pixel);
            assigned += 1;
        }

        let occupied = table.iter().filter(|b| !b.is_empty()).count();
        debug!(
            camera = cam_idx,
            pixels = camera.pixel_count(),
            assigned,
            occupied,
            "generated buckets"
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.buckets.iter_mut().flatten().for_each(Vec::clear);
    }

    pub fn camera_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn projector_pixel_count(&self) -> usize {
        self.projector_pixels
    }

    /// Camera pixels of `camera` that decoded to `projector_pixel`.
    /// Empty for unknown cameras or indices.
    pub fn bucket(&self, camera: usize, projector_pixel: usize) -> &[usize] {
        self.buckets
            .get(camera)
            .and_then(|table| table.get(projector_pixel))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of non-empty buckets for `camera`
    pub fn occupied(&self, camera: usize) -> usize {
        self.buckets
            .get(camera)
            .map_or(0, |table| table.iter().filter(|b| !b.is_empty()).count())
    }

    /// True when both cameras have at least one pixel in the bucket
    pub fn is_shared(&self, first: usize, second: usize, projector_pixel: usize) -> bool {
        !self.bucket(first, projector_pixel).is_empty()
            && !self.bucket(second, projector_pixel).is_empty()
    }
}
