// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Flat-topped SA-style keycap approximations, for fit checks in assemblies

use crate::ast::{hull_of, Node, Rgba};
use crate::error::{GeometryError, Result};
use std::fmt;

const SA_LENGTH: f64 = 18.25;
const SA_ONE_AND_HALF_LENGTH: f64 = 28.0;
const SA_DOUBLE_LENGTH: f64 = 37.5;
const SA_MID_SHRINK: f64 = 0.625;
const SA_TOP_SHRINK: f64 = 3.125;

/// Gap between the plate face and the bottom of the cap
const CAP_LIFT: f64 = 5.0;
const LAYER_THICKNESS: f64 = 0.1;
const BASE_HEIGHT: f64 = 0.05;
const MID_HEIGHT: f64 = 6.0;
const TOP_HEIGHT: f64 = 12.0;

/// Supported keycap sizes, in key units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    One,
    OneAndHalf,
    Two,
}

impl KeySize {
    pub const ALL: [KeySize; 3] = [KeySize::One, KeySize::OneAndHalf, KeySize::Two];

    pub fn from_units(units: f64) -> Result<Self> {
        if units == 1.0 {
            Ok(KeySize::One)
        } else if units == 1.5 {
            Ok(KeySize::OneAndHalf)
        } else if units == 2.0 {
            Ok(KeySize::Two)
        } else {
            Err(GeometryError::UnknownKeySize(units))
        }
    }

    pub fn units(&self) -> f64 {
        match self {
            KeySize::One => 1.0,
            KeySize::OneAndHalf => 1.5,
            KeySize::Two => 2.0,
        }
    }

    /// Base footprint as (width along X, length along Y)
    fn footprint(&self) -> (f64, f64) {
        match self {
            KeySize::One => (SA_LENGTH, SA_LENGTH),
            KeySize::OneAndHalf => (SA_LENGTH, SA_ONE_AND_HALF_LENGTH),
            KeySize::Two => (SA_LENGTH, SA_DOUBLE_LENGTH),
        }
    }

    fn color(&self) -> Rgba {
        let [r, g, b] = match self {
            KeySize::One => [220.0, 163.0, 163.0],
            KeySize::OneAndHalf => [240.0, 223.0, 175.0],
            KeySize::Two => [127.0, 159.0, 127.0],
        };
        [r / 255.0, g / 255.0, b / 255.0, 1.0]
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}u", self.units())
    }
}

/// Thin extruded rectangle centered on the Z axis, starting at `z`
fn cross_section(half_width: f64, half_length: f64, z: f64) -> Node {
    Node::polygon([
        (half_width, half_length),
        (half_width, -half_length),
        (-half_width, -half_length),
        (-half_width, half_length),
    ])
    .linear_extrude(LAYER_THICKNESS)
    .up(z)
}

/// SA row 3 keycap with a flat top, sitting above a switch mounted at the origin
pub fn sa_cap(size: KeySize) -> Node {
    let (width, length) = size.footprint();
    let layers = [
        (0.0, BASE_HEIGHT),
        (SA_MID_SHRINK, MID_HEIGHT),
        (SA_TOP_SHRINK, TOP_HEIGHT),
    ]
    .map(|(shrink, z)| cross_section(width / 2.0 - shrink, length / 2.0 - shrink, z));

    hull_of(layers)
        .up(CAP_LIFT)
        .color(size.color())
        .labeled("keycap")
}
