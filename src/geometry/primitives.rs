// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Primitive adapter
//!
//! Checked constructors over the raw AST primitives. Circular primitives are corrected so
//! the polygon the renderer emits circumscribes the requested circle instead of being
//! inscribed in it; holes cut with these come out at least as large as asked for.

use crate::ast::{difference_of, Node, Vec3};
use crate::error::{ensure_positive, GeometryError, Result};
use std::f64::consts::PI;

/// Segment count used when a builder does not ask for one
pub const DEFAULT_SEGMENTS: u32 = 16;

/// Radius of a circular primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radius {
    Uniform(f64),
    /// Bottom and top radii of a frustum
    Tapered(f64, f64),
}

impl Radius {
    fn scaled(self, factor: f64) -> Self {
        match self {
            Radius::Uniform(r) => Radius::Uniform(r * factor),
            Radius::Tapered(r1, r2) => Radius::Tapered(r1 * factor, r2 * factor),
        }
    }

    fn bottom_top(self) -> (f64, f64) {
        match self {
            Radius::Uniform(r) => (r, r),
            Radius::Tapered(r1, r2) => (r1, r2),
        }
    }
}

impl From<f64> for Radius {
    fn from(r: f64) -> Self {
        Radius::Uniform(r)
    }
}

impl From<(f64, f64)> for Radius {
    fn from((r1, r2): (f64, f64)) -> Self {
        Radius::Tapered(r1, r2)
    }
}

/// `1 / cos(π / segments)`, the circumscribing correction factor
pub fn fudge_factor(segments: u32) -> Result<f64> {
    if segments < 3 {
        return Err(GeometryError::TooFewSegments(segments));
    }
    Ok(1.0 / (PI / f64::from(segments)).cos())
}

/// Adjust `radius` so a `segments`-gon circumscribes the circle of that radius
pub fn fudge_radius(radius: impl Into<Radius>, segments: u32) -> Result<Radius> {
    Ok(radius.into().scaled(fudge_factor(segments)?))
}

/// Cylinder (or frustum) built from circumscribed polygons
pub fn cylinder_outer(radius: impl Into<Radius>, h: f64, segments: u32, center: bool) -> Result<Node> {
    let radius = radius.into();
    let (r1, r2) = radius.bottom_top();
    ensure_positive("cylinder radius", r1)?;
    ensure_positive("cylinder radius", r2)?;
    ensure_positive("cylinder height", h)?;

    let (r1, r2) = fudge_radius(radius, segments)?.bottom_top();
    Ok(Node::cylinder(h, r1, r2, segments, center))
}

/// Box primitive that rejects zero, negative, or non-finite sizes
pub fn checked_cube(size: Vec3, center: bool) -> Result<Node> {
    ensure_positive("cube width", size.x)?;
    ensure_positive("cube length", size.y)?;
    ensure_positive("cube height", size.z)?;
    Ok(if center {
        Node::centered_cube(size.x, size.y, size.z)
    } else {
        Node::cube(size.x, size.y, size.z)
    })
}

/// A completely empty shape: a unit cube minus an enclosing cube
pub fn nothing() -> Node {
    difference_of(
        Node::centered_cube(1.0, 1.0, 1.0),
        [Node::centered_cube(2.0, 2.0, 2.0)],
    )
}

/// Include a part only when `condition` holds, otherwise substitute [`nothing`].
///
/// ```
/// use spkb::ast::Node;
/// use spkb::geometry::{nothing, optional};
///
/// let part = Node::cube(1.0, 1.0, 1.0);
/// assert_eq!(optional(true)(part.clone()), part);
/// assert_eq!(optional(false)(part), nothing());
/// ```
pub fn optional(condition: bool) -> impl Fn(Node) -> Node {
    move |part| if condition { part } else { nothing() }
}
