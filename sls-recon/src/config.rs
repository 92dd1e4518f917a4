//! Reconstruction settings

use crate::intersect::{IntersectionStrategy, RayIntersector};
use serde::{Deserialize, Serialize};
use sls_core::{Projector, Result, SlsError};

/// Implementation used to run the reconstruction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    Cpu,
}

/// Reconstructor configuration.
///
/// Missing fields in serialized form fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructorConfig {
    /// Projector resolution width
    pub projector_width: usize,
    /// Projector resolution height
    pub projector_height: usize,
    pub backend: Backend,
    pub strategy: IntersectionStrategy,
    /// Ray pairs with `|dir_a x dir_b|` below this are skipped as parallel
    pub parallel_epsilon: f64,
    /// Spread the per-projector-pixel loop over the rayon thread pool
    pub parallel: bool,
}

impl ReconstructorConfig {
    pub fn new(projector_width: usize, projector_height: usize) -> Self {
        Self {
            projector_width,
            projector_height,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: IntersectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_epsilon(mut self, parallel_epsilon: f64) -> Self {
        self.parallel_epsilon = parallel_epsilon;
        self
    }

    /// Projector grid described by this config
    pub fn projector(&self) -> Result<Projector> {
        Projector::new(self.projector_width, self.projector_height)
    }

    pub fn intersector(&self) -> RayIntersector {
        RayIntersector::new(self.strategy, self.parallel_epsilon)
    }

    pub fn validate(&self) -> Result<()> {
        self.projector()?;
        if !self.parallel_epsilon.is_finite() || self.parallel_epsilon < 0.0 {
            return Err(SlsError::InvalidInput(format!(
                "parallel_epsilon must be finite and non-negative, got {}",
                self.parallel_epsilon
            )));
        }
        Ok(())
    }
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self {
            projector_width: 1024,
            projector_height: 768,
            backend: Backend::Cpu,
            strategy: IntersectionStrategy::Average,
            parallel_epsilon: RayIntersector::DEFAULT_PARALLEL_EPSILON,
            parallel: true,
        }
    }
}
