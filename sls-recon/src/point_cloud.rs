//! Reconstructed colored points

use nalgebra::Vector3;

/// A triangulated surface point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Projector pixel the point was triangulated from
    pub projector_pixel: usize,
    pub position: Vector3<f64>,
    /// RGB in [0, 1] for cameras that report normalized colors
    pub color: Vector3<f64>,
}

impl Point {
    pub fn new(projector_pixel: usize, position: Vector3<f64>, color: Vector3<f64>) -> Self {
        Self {
            projector_pixel,
            position,
            color,
        }
    }
}

/// Points ordered by ascending projector pixel, at most one per pixel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Point triangulated from `projector_pixel`, if any
    pub fn get(&self, projector_pixel: usize) -> Option<&Point> {
        self.points
            .binary_search_by_key(&projector_pixel, |p| p.projector_pixel)
            .ok()
            .map(|i| &self.points[i])
    }

    pub fn positions(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.points.iter().map(|p| &p.position)
    }

    pub fn colors(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.points.iter().map(|p| &p.color)
    }

    /// Mean position
    pub fn centroid(&self) -> Option<Vector3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .positions()
            .fold(Vector3::zeros(), |acc, p| acc + p);
        Some(sum / self.points.len() as f64)
    }

    /// Axis-aligned bounding box (min, max)
    pub fn bounds(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let mut positions = self.positions();
        let first = *positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl From<Vec<Point>> for PointCloud {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PointCloud {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud() -> PointCloud {
        vec![
            Point::new(2, Vector3::new(0.0, 1.0, 4.0), Vector3::new(1.0, 0.0, 0.0)),
            Point::new(5, Vector3::new(2.0, -1.0, 6.0), Vector3::new(0.0, 1.0, 0.0)),
            Point::new(9, Vector3::new(1.0, 3.0, 5.0), Vector3::new(0.0, 0.0, 1.0)),
        ]
        .into()
    }

    #[test]
    fn test_empty_cloud() {
        let cloud = PointCloud::default();
        assert!(cloud.is_empty());
        assert_eq!(cloud.len(), 0);
        assert!(cloud.centroid().is_none());
        assert!(cloud.bounds().is_none());
        assert!(cloud.get(0).is_none());
    }

    #[test]
    fn test_lookup_by_projector_pixel() {
        let cloud = cloud();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.get(5).unwrap().position, Vector3::new(2.0, -1.0, 6.0));
        assert!(cloud.get(4).is_none());
    }

    #[test]
    fn test_centroid_and_bounds() {
        let cloud = cloud();
        let c = cloud.centroid().unwrap();
        assert!((c - Vector3::new(1.0, 1.0, 5.0)).norm() < 1e-12);

        let (min, max) = cloud.bounds().unwrap();
        assert_eq!(min, Vector3::new(0.0, -1.0, 4.0));
        assert_eq!(max, Vector3::new(2.0, 3.0, 6.0));
    }

    #[test]
    fn test_iteration() {
        let cloud = cloud();
        let pixels: Vec<usize> = cloud.iter().map(|p| p.projector_pixel).collect();
        assert_eq!(pixels, vec![2, 5, 9]);
        assert_eq!(cloud.colors().count(), 3);

        let collected: PointCloud = cloud.clone().into_iter().collect();
        assert_eq!(collected, cloud);
    }
}
