use nalgebra::Vector3;
use sls_core::{Camera, Ray};

pub struct SyntheticPixel {
    pub decoded: Option<usize>,
    pub ray: Ray,
    pub color: Vector3<f64>,
}

/// Camera whose pixels are listed explicitly
#[derive(Default)]
pub struct SyntheticCamera {
    pub pixels: Vec<SyntheticPixel>,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel whose ray starts at `origin` and passes through `target`
    pub fn with_pixel(
        mut self,
        decoded: Option<usize>,
        origin: Vector3<f64>,
        target: Vector3<f64>,
        color: Vector3<f64>,
    ) -> Self {
        self.pixels.push(SyntheticPixel {
            decoded,
            ray: Ray::through(origin, target),
            color,
        });
        self
    }

    pub fn with_ray(mut self, decoded: Option<usize>, ray: Ray, color: Vector3<f64>) -> Self {
        self.pixels.push(SyntheticPixel {
            decoded,
            ray,
            color,
        });
        self
    }
}

impl Camera for SyntheticCamera {
    fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    fn decoded_projector_pixel(&self, pixel: usize) -> Option<usize> {
        self.pixels[pixel].decoded
    }

    fn ray_for(&self, pixel: usize) -> Ray {
        self.pixels[pixel].ray
    }

    fn color_at(&self, pixel: usize) -> Vector3<f64> {
        self.pixels[pixel].color
    }
}
