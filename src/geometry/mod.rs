// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Geometry module - checked primitives and bounds

mod bbox;
mod primitives;

pub use bbox::BoundingBox;
pub use primitives::{
    checked_cube, cylinder_outer, fudge_factor, fudge_radius, nothing, optional, Radius,
    DEFAULT_SEGMENTS,
};
