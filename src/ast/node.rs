// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! AST Node definitions

use nalgebra::{Matrix4, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// 3D Vector type alias
pub type Vec3 = nalgebra::Vector3<f64>;

/// 2D Vector type alias (polygon points)
pub type Vec2 = nalgebra::Vector2<f64>;

/// RGBA color, each channel in `0.0..=1.0`
pub type Rgba = [f64; 4];

/// AST Node representing a single CSG operation or primitive.
///
/// Nodes are values: every builder method consumes its operands and returns a new node,
/// so a finished tree is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Optional label, used to find instances inside a larger tree
    pub id: Option<String>,
}

/// Types of AST nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    // Primitives
    Cube {
        size: Vec3,
        center: bool,
    },
    Cylinder {
        h: f64,
        r1: f64,
        r2: f64,
        fn_: u32,
        center: bool,
    },
    Polygon(Vec<Vec2>),
    LinearExtrude {
        height: f64,
        center: bool,
        children: Vec<Node>,
    },

    // Boolean operations
    Union(Vec<Node>),
    /// First child minus the union of the rest; order is significant
    Difference(Vec<Node>),
    Intersection(Vec<Node>),
    Hull(Vec<Node>),

    // Transformations
    Transform {
        op: TransformOp,
        children: Vec<Node>,
    },

    Color {
        rgba: Rgba,
        children: Vec<Node>,
    },
}

impl NodeKind {
    /// Get child nodes
    pub fn children(&self) -> &[Node] {
        match self {
            NodeKind::Union(children)
            | NodeKind::Difference(children)
            | NodeKind::Intersection(children)
            | NodeKind::Hull(children) => children,
            NodeKind::Transform { children, .. }
            | NodeKind::Color { children, .. }
            | NodeKind::LinearExtrude { children, .. } => children,
            NodeKind::Cube { .. } | NodeKind::Cylinder { .. } | NodeKind::Polygon(_) => &[],
        }
    }

    /// OpenSCAD module name for this node kind
    pub fn module_name(&self) -> &'static str {
        match self {
            NodeKind::Cube { .. } => "cube",
            NodeKind::Cylinder { .. } => "cylinder",
            NodeKind::Polygon(_) => "polygon",
            NodeKind::LinearExtrude { .. } => "linear_extrude",
            NodeKind::Union(_) => "union",
            NodeKind::Difference(_) => "difference",
            NodeKind::Intersection(_) => "intersection",
            NodeKind::Hull(_) => "hull",
            NodeKind::Transform { op, .. } => op.module_name(),
            NodeKind::Color { .. } => "color",
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            NodeKind::Cube { .. } | NodeKind::Cylinder { .. } | NodeKind::Polygon(_)
        )
    }
}

/// Transformation operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformOp {
    Translate(Vec3),
    /// Euler angles in degrees, applied X then Y then Z
    Rotate(Vec3),
    /// Rotation by `angle` degrees about an arbitrary axis
    RotateAbout { angle: f64, axis: Vec3 },
    /// Reflection across the plane through the origin with the given normal
    Mirror(Vec3),
}

impl TransformOp {
    pub fn module_name(&self) -> &'static str {
        match self {
            TransformOp::Translate(_) => "translate",
            TransformOp::Rotate(_) | TransformOp::RotateAbout { .. } => "rotate",
            TransformOp::Mirror(_) => "mirror",
        }
    }

    /// Convert transformation to a 4x4 matrix
    pub fn to_matrix(&self) -> Matrix4<f64> {
        match self {
            TransformOp::Translate(v) => Matrix4::new_translation(v),
            TransformOp::Rotate(angles) => {
                let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x.to_radians());
                let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y.to_radians());
                let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z.to_radians());
                (rz * ry * rx).to_homogeneous()
            }
            TransformOp::RotateAbout { angle, axis } => {
                if axis.norm() == 0.0 {
                    return Matrix4::identity();
                }
                UnitQuaternion::from_axis_angle(&Unit::new_normalize(*axis), angle.to_radians())
                    .to_homogeneous()
            }
            TransformOp::Mirror(normal) => {
                let len_sq = normal.norm_squared();
                if len_sq == 0.0 {
                    return Matrix4::identity();
                }
                let reflection = nalgebra::Matrix3::identity() - (normal * normal.transpose()) * (2.0 / len_sq);
                reflection.to_homogeneous()
            }
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, id: None }
    }

    pub fn with_id(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }

    // Primitives

    /// Box with one corner at the origin
    pub fn cube(x: f64, y: f64, z: f64) -> Self {
        Self::new(NodeKind::Cube {
            size: Vec3::new(x, y, z),
            center: false,
        })
    }

    /// Box centered on the origin
    pub fn centered_cube(x: f64, y: f64, z: f64) -> Self {
        Self::new(NodeKind::Cube {
            size: Vec3::new(x, y, z),
            center: true,
        })
    }

    pub fn cylinder(h: f64, r1: f64, r2: f64, fn_: u32, center: bool) -> Self {
        Self::new(NodeKind::Cylinder {
            h,
            r1,
            r2,
            fn_,
            center,
        })
    }

    pub fn polygon(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::new(NodeKind::Polygon(
            points.into_iter().map(|(x, y)| Vec2::new(x, y)).collect(),
        ))
    }

    // Transforms

    fn transformed(self, op: TransformOp) -> Self {
        Self::new(NodeKind::Transform {
            op,
            children: vec![self],
        })
    }

    pub fn translate(self, v: Vec3) -> Self {
        self.transformed(TransformOp::Translate(v))
    }

    pub fn translate_xyz(self, x: f64, y: f64, z: f64) -> Self {
        self.translate(Vec3::new(x, y, z))
    }

    pub fn up(self, z: f64) -> Self {
        self.translate_xyz(0.0, 0.0, z)
    }

    pub fn down(self, z: f64) -> Self {
        self.translate_xyz(0.0, 0.0, -z)
    }

    pub fn right(self, x: f64) -> Self {
        self.translate_xyz(x, 0.0, 0.0)
    }

    pub fn left(self, x: f64) -> Self {
        self.translate_xyz(-x, 0.0, 0.0)
    }

    /// Move toward +Y (away from the typist)
    pub fn forward(self, y: f64) -> Self {
        self.translate_xyz(0.0, y, 0.0)
    }

    pub fn back(self, y: f64) -> Self {
        self.translate_xyz(0.0, -y, 0.0)
    }

    pub fn rotate(self, angles: Vec3) -> Self {
        self.transformed(TransformOp::Rotate(angles))
    }

    pub fn rotate_z(self, degrees: f64) -> Self {
        self.rotate(Vec3::new(0.0, 0.0, degrees))
    }

    pub fn rotate_about(self, angle: f64, axis: Vec3) -> Self {
        self.transformed(TransformOp::RotateAbout { angle, axis })
    }

    pub fn mirror(self, normal: Vec3) -> Self {
        self.transformed(TransformOp::Mirror(normal))
    }

    pub fn color(self, rgba: Rgba) -> Self {
        Self::new(NodeKind::Color {
            rgba,
            children: vec![self],
        })
    }

    /// Extrude a 2D child along +Z
    pub fn linear_extrude(self, height: f64) -> Self {
        Self::new(NodeKind::LinearExtrude {
            height,
            center: false,
            children: vec![self],
        })
    }

    /// Attach a label, replacing any existing one
    pub fn labeled(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn children(&self) -> &[Node] {
        self.kind.children()
    }
}

/// Union of all given shapes
pub fn union_of(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Union(children.into_iter().collect()))
}

/// `base` minus the union of `cutters`
pub fn difference_of(base: Node, cutters: impl IntoIterator<Item = Node>) -> Node {
    let mut children = vec![base];
    children.extend(cutters);
    Node::new(NodeKind::Difference(children))
}

pub fn intersection_of(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Intersection(children.into_iter().collect()))
}

/// Convex hull of all given shapes
pub fn hull_of(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Hull(children.into_iter().collect()))
}
