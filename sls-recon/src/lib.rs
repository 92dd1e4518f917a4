//! Structured-light point cloud reconstruction.
//!
//! Camera pixels are grouped by the projector pixel they decoded to
//! ([`BucketTable`]), and every projector pixel seen by both registered cameras
//! is triangulated into one colored point ([`RayIntersector`]).

pub mod buckets;
pub mod config;
pub mod cpu;
pub mod intersect;
pub mod logging;
pub mod point_cloud;
pub mod reconstructor;

#[cfg(test)]
mod test_support;

pub use buckets::BucketTable;
pub use config::{Backend, ReconstructorConfig};
pub use cpu::CpuReconstructor;
pub use intersect::{
    closest_approach, ClosestApproach, Intersection, IntersectionStrategy, RayIntersector,
};
pub use point_cloud::{Point, PointCloud};
pub use reconstructor::{build_reconstructor, Reconstructor};

// Re-export from sls-core for convenience
pub use sls_core::{Camera, Projector, ReconstructionError, Result, SlsError};
