// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Approximation of a single-key hot-swap PCB hanging below a switch

use crate::ast::{difference_of, hull_of, Node, Vec3};
use crate::error::Result;
use crate::geometry::{checked_cube, cylinder_outer, DEFAULT_SEGMENTS};
use crate::keyswitch::Keyswitch;

pub const PCB_THICKNESS: f64 = 1.57;
pub const PCB_SIZE: f64 = 19.0;
const PCB_CORNER_RADIUS: f64 = 1.25;
const PCB_CORNER_OFFSET: f64 = PCB_SIZE / 2.0 - PCB_CORNER_RADIUS;
pub const PCB_HOLE_RADIUS: f64 = 1.7 / 2.0;
/// Distance of each mounting hole from the board center, along both axes
pub const PCB_HOLE_OFFSET: f64 = 8.0;

const CORNERS: [(f64, f64); 4] = [(-1.0, 1.0), (-1.0, -1.0), (1.0, 1.0), (1.0, -1.0)];

/// Screw positions of the board relative to the switch center
pub fn pcb_hole_positions() -> [(f64, f64); 4] {
    CORNERS.map(|(sx, sy)| (sx * PCB_HOLE_OFFSET, sy * PCB_HOLE_OFFSET))
}

/// The PCB under `switch`, with its top face against the switch base.
///
/// `simple` swaps the rounded, drilled outline for a plain box of the same size.
pub fn single_key_board(switch: &Keyswitch, simple: bool) -> Result<Node> {
    let pcb = if simple {
        checked_cube(Vec3::new(PCB_SIZE, PCB_SIZE, PCB_THICKNESS), true)?
    } else {
        let corner = cylinder_outer(PCB_CORNER_RADIUS, PCB_THICKNESS, DEFAULT_SEGMENTS, true)?;
        let hole = cylinder_outer(PCB_HOLE_RADIUS, PCB_THICKNESS * 2.0, DEFAULT_SEGMENTS, true)?;

        let outline = hull_of(CORNERS.map(|(sx, sy)| {
            corner
                .clone()
                .translate(Vec3::new(sx * PCB_CORNER_OFFSET, sy * PCB_CORNER_OFFSET, 0.0))
        }));
        let holes = pcb_hole_positions().map(|(x, y)| hole.clone().translate(Vec3::new(x, y, 0.0)));

        difference_of(outline, holes)
    };

    Ok(pcb
        .down(PCB_THICKNESS / 2.0 + switch.depth)
        .labeled("single_key_pcb"))
}
