// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Bounding box utilities

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all given points; `None` for no points
    pub fn from_points(points: impl IntoIterator<Item = Point3<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = Self::new(first, first);
        for point in points {
            bbox.expand_to_include(&point);
        }
        Some(bbox)
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        let mut merged = *self;
        merged.expand_to_include(&other.min);
        merged.expand_to_include(&other.max);
        merged
    }

    /// Overlapping region, or `None` when the boxes are disjoint
    pub fn intersect(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min = Point3::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        (min.x <= max.x && min.y <= max.y && min.z <= max.z).then(|| BoundingBox::new(min, max))
    }

    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.min.z <= other.min.z
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
            && self.max.z >= other.max.z
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Box enclosing this box after an affine transform
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> BoundingBox {
        let corners = self.corners().map(|corner| matrix.transform_point(&corner));
        // eight corners, never empty
        let mut bbox = BoundingBox::new(corners[0], corners[0]);
        for corner in &corners[1..] {
            bbox.expand_to_include(corner);
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit() -> BoundingBox {
        BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_merge_and_size() {
        let other = BoundingBox::new(Point3::new(2.0, -1.0, 0.0), Point3::new(3.0, 0.5, 4.0));
        let merged = unit().merge(&other);
        assert_eq!(merged.min, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(merged.size(), Vector3::new(3.0, 2.0, 4.0));
    }

    #[test]
    fn test_intersect_disjoint() {
        let far = BoundingBox::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
        assert!(unit().intersect(&far).is_none());

        let overlap = BoundingBox::new(Point3::new(0.5, 0.5, 0.5), Point3::new(2.0, 2.0, 2.0));
        let shared = unit().intersect(&overlap).unwrap();
        assert_eq!(shared.size(), Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_transformed_by_rotation() {
        let rotate = nalgebra::Rotation3::from_axis_angle(
            &Vector3::z_axis(),
            std::f64::consts::FRAC_PI_2,
        )
        .to_homogeneous();
        let rotated = unit().transformed(&rotate);
        assert_relative_eq!(rotated.min.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.max.y, 1.0, epsilon = 1e-12);
    }
}
