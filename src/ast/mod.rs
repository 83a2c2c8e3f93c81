// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Abstract Syntax Tree module
//!
//! Defines the immutable CSG tree that every part builder produces

mod evaluator;
mod node;
mod visit;

pub use evaluator::Evaluator;
pub use node::{
    difference_of, hull_of, intersection_of, union_of, Node, NodeKind, Rgba, TransformOp, Vec2,
    Vec3,
};
pub use visit::TreeStats;
