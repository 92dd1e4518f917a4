//! Projector pixel grid

use crate::error::{Result, SlsError};

/// Addressable projector pixel grid that correspondences are indexed against.
///
/// Pixel indices are the row-major flattening of `(x, y)`: `y * width + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projector {
    width: usize,
    height: usize,
}

impl Projector {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SlsError::InvalidInput(format!(
                "projector size {width}x{height} is empty"
            )));
        }
        width.checked_mul(height).ok_or_else(|| {
            SlsError::InvalidInput(format!("projector size {width}x{height} overflows"))
        })?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of projector pixels (`width * height`)
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.pixel_count()
    }

    /// Flat index of projector pixel (x, y)
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Projector pixel (x, y) of a flat index
    pub fn coords(&self, index: usize) -> Option<(usize, usize)> {
        self.contains(index)
            .then_some((index % self.width, index / self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projector_pixel_count() {
        let projector = Projector::new(1024, 768).unwrap();
        assert_eq!(projector.pixel_count(), 786_432);
        assert_eq!(projector.width(), 1024);
        assert_eq!(projector.height(), 768);
    }

    #[test]
    fn test_projector_row_major_indexing() {
        let projector = Projector::new(4, 3).unwrap();
        assert_eq!(projector.index(0, 0), Some(0));
        assert_eq!(projector.index(3, 0), Some(3));
        assert_eq!(projector.index(1, 2), Some(9));
        assert_eq!(projector.index(4, 0), None);
        assert_eq!(projector.index(0, 3), None);

        assert_eq!(projector.coords(9), Some((1, 2)));
        assert_eq!(projector.coords(11), Some((3, 2)));
        assert_eq!(projector.coords(12), None);
        assert!(projector.contains(11));
        assert!(!projector.contains(12));
    }

    #[test]
    fn test_projector_rejects_empty_grid() {
        assert!(matches!(
            Projector::new(0, 768),
            Err(SlsError::InvalidInput(_))
        ));
        assert!(Projector::new(1024, 0).is_err());
    }
}
