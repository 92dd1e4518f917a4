//! Triangulation of corresponding camera rays

use crate::buckets::BucketTable;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use sls_core::{Camera, Ray};

/// Closest-approach of two lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    /// Midpoint of the shortest segment connecting the lines
    pub midpoint: Vector3<f64>,
    /// Length of that segment
    pub distance: f64,
}

/// Midpoint of the shortest segment between the lines carrying `a` and `b`.
///
/// Solves for `s, t` minimizing `|a.origin + s*a.dir - b.origin - t*b.dir|`.
/// Returns None when `|a.dir x b.dir| < parallel_epsilon` or either direction
/// is zero or non-finite.
pub fn closest_approach(a: &Ray, b: &Ray, parallel_epsilon: f64) -> Option<ClosestApproach> {
    let cross = a.direction.cross(&b.direction);
    let cross_norm = cross.norm();
    if !cross_norm.is_finite() || cross_norm == 0.0 || cross_norm < parallel_epsilon {
        return None;
    }

    let w0 = a.origin - b.origin;
    let aa = a.direction.dot(&a.direction);
    let ab = a.direction.dot(&b.direction);
    let bb = b.direction.dot(&b.direction);
    let d = a.direction.dot(&w0);
    let e = b.direction.dot(&w0);

    // aa*bb - ab^2 == |a.dir x b.dir|^2
    let denom = cross_norm * cross_norm;
    let s = (ab * e - bb * d) / denom;
    let t = (aa * e - ab * d) / denom;

    let on_a = a.at(s);
    let on_b = b.at(t);
    let distance = (on_a - on_b).norm();

    // non-finite origins pass the direction test
    distance.is_finite().then(|| ClosestApproach {
        midpoint: (on_a + on_b) * 0.5,
        distance,
    })
}

/// How the ray pairs of one projector pixel are fused into a point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionStrategy {
    /// Mean midpoint and color over all non-degenerate pairs.
    /// Gives smoother surfaces than picking a single pair.
    #[default]
    Average,
    /// Midpoint and color of the pair whose rays pass closest to each other
    MinDistance,
}

/// Triangulated position and color for one projector pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub position: Vector3<f64>,
    pub color: Vector3<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersector {
    strategy: IntersectionStrategy,
    parallel_epsilon: f64,
}

impl RayIntersector {
    pub const DEFAULT_PARALLEL_EPSILON: f64 = 1e-6;

    pub fn new(strategy: IntersectionStrategy, parallel_epsilon: f64) -> Self {
        Self {
            strategy,
            parallel_epsilon,
        }
    }

    pub fn strategy(&self) -> IntersectionStrategy {
        self.strategy
    }

    pub fn parallel_epsilon(&self) -> f64 {
        self.parallel_epsilon
    }

    /// Intersect the buckets of `projector_pixel` from cameras `first` and `second`.
    ///
    /// `cameras` must be the cameras `buckets` was generated from, in the same
    /// order. Returns None when either bucket is empty or every pair is degenerate.
    pub fn intersect_bucket(
        &self,
        buckets: &BucketTable,
        cameras: &[&dyn Camera],
        first: usize,
        second: usize,
        projector_pixel: usize,
    ) -> Option<Intersection> {
        let first_camera = *cameras.get(first)?;
        let second_camera = *cameras.get(second)?;
        self.intersect(
            first_camera,
            buckets.bucket(first, projector_pixel),
            second_camera,
            buckets.bucket(second, projector_pixel),
        )
    }

    /// Fuse every cross pair of pixels from two corresponding buckets
    pub fn intersect(
        &self,
        first: &dyn Camera,
        first_pixels: &[usize],
        second: &dyn Camera,
        second_pixels: &[usize],
    ) -> Option<Intersection> {
        if first_pixels.is_empty() || second_pixels.is_empty() {
            return None;
        }

        let first_samples = samples(first, first_pixels);
        let second_samples = samples(second, second_pixels);

        let pairs = first_samples.iter().flat_map(|(ray_a, color_a)| {
            second_samples.iter().filter_map(move |(ray_b, color_b)| {
                closest_approach(ray_a, ray_b, self.parallel_epsilon)
                    .map(|approach| (approach, (color_a + color_b) * 0.5))
            })
        });

        match self.strategy {
            IntersectionStrategy::Average => {
                let mut position = Vector3::zeros();
                let mut color = Vector3::zeros();
                let mut count = 0usize;
                for (approach, pair_color) in pairs {
                    position += approach.midpoint;
                    color += pair_color;
                    count += 1;
                }
                (count > 0).then(|| {
                    let n = count as f64;
                    Intersection {
                        position: position / n,
                        color: color / n,
                    }
                })
            }
            IntersectionStrategy::MinDistance => {
                let mut best: Option<(ClosestApproach, Vector3<f64>)> = None;
                for (approach, pair_color) in pairs {
                    if best.is_none_or(|(b, _)| approach.distance < b.distance) {
                        best = Some((approach, pair_color));
                    }
                }
                best.map(|(approach, color)| Intersection {
                    position: approach.midpoint,
                    color,
                })
            }
        }
    }
}

impl Default for RayIntersector {
    fn default() -> Self {
        Self::new(
            IntersectionStrategy::default(),
            Self::DEFAULT_PARALLEL_EPSILON,
        )
    }
}

fn samples(camera: &dyn Camera, pixels: &[usize]) -> Vec<(Ray, Vector3<f64>)> {
    pixels
        .iter()
        .map(|&p| (camera.ray_for(p), camera.color_at(p)))
        .collect()
}
