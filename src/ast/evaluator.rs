// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! AST Evaluator - computes conservative bounds of a CSG tree
//!
//! No tessellation happens here; the external renderer owns the real geometry. The bounds
//! are exact for boxes and unions, and conservative for cylinders, hulls and differences.

use super::{Node, NodeKind};
use crate::geometry::BoundingBox;
use nalgebra::{Matrix4, Point3};

/// Bounds evaluator
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Bounding box of the solid described by `node`, or `None` if it is empty
    pub fn bounds(&self, node: &Node) -> Option<BoundingBox> {
        self.evaluate_node(&node.kind, &Matrix4::identity())
    }

    fn evaluate_node(&self, kind: &NodeKind, transform: &Matrix4<f64>) -> Option<BoundingBox> {
        match kind {
            NodeKind::Cube { size, center } => {
                let local = if *center {
                    BoundingBox::new(Point3::from(-size / 2.0), Point3::from(size / 2.0))
                } else {
                    BoundingBox::new(Point3::origin(), Point3::from(*size))
                };
                Some(local.transformed(transform))
            }

            NodeKind::Cylinder {
                h, r1, r2, center, ..
            } => {
                let r = r1.max(*r2);
                let (z0, z1) = if *center { (-h / 2.0, h / 2.0) } else { (0.0, *h) };
                let local = BoundingBox::new(Point3::new(-r, -r, z0), Point3::new(r, r, z1));
                Some(local.transformed(transform))
            }

            NodeKind::Polygon(points) => BoundingBox::from_points(
                points.iter().map(|p| transform.transform_point(&Point3::new(p.x, p.y, 0.0))),
            ),

            NodeKind::LinearExtrude {
                height,
                center,
                children,
            } => {
                let profile = self.merge_children(children, &Matrix4::identity())?;
                let (z0, z1) = if *center {
                    (-height / 2.0, height / 2.0)
                } else {
                    (0.0, *height)
                };
                let local = BoundingBox::new(
                    Point3::new(profile.min.x, profile.min.y, z0),
                    Point3::new(profile.max.x, profile.max.y, z1),
                );
                Some(local.transformed(transform))
            }

            NodeKind::Union(children) | NodeKind::Hull(children) => {
                self.merge_children(children, transform)
            }

            NodeKind::Difference(children) => {
                let (base, cutters) = children.split_first()?;
                let base_bounds = self.evaluate_node(&base.kind, transform)?;
                // Only plain box cutters are checked for swallowing the base (see `nothing()`).
                let swallowed = cutters.iter().any(|cutter| {
                    matches!(cutter.kind, NodeKind::Cube { .. })
                        && self
                            .evaluate_node(&cutter.kind, transform)
                            .is_some_and(|cut| cut.contains(&base_bounds))
                });
                (!swallowed).then_some(base_bounds)
            }

            NodeKind::Intersection(children) => {
                let mut iter = children.iter();
                let mut acc = self.evaluate_node(&iter.next()?.kind, transform)?;
                for child in iter {
                    let child_bounds = self.evaluate_node(&child.kind, transform)?;
                    acc = acc.intersect(&child_bounds)?;
                }
                Some(acc)
            }

            NodeKind::Transform { op, children } => {
                let new_transform = transform * op.to_matrix();
                self.merge_children(children, &new_transform)
            }

            NodeKind::Color { children, .. } => self.merge_children(children, transform),
        }
    }

    fn merge_children(&self, children: &[Node], transform: &Matrix4<f64>) -> Option<BoundingBox> {
        children
            .iter()
            .filter_map(|child| self.evaluate_node(&child.kind, transform))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}
