// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Backplates for hot-swap sockets

use super::{BackplateHole, Keyswitch, PlateOptions};
use crate::ast::{difference_of, hull_of, union_of, Node, Vec3};
use crate::error::Result;
use crate::geometry::{checked_cube, cylinder_outer, DEFAULT_SEGMENTS};

/// How far the backplate extends past the mounting hole, in total per axis
const BACKPLATE_MARGIN: f64 = 3.0;

/// Footprint of the hot-swap socket body kept clear under the backplate
const CLEARANCE_WIDTH: f64 = 16.5;
const CLEARANCE_LENGTH: f64 = 7.5;

impl Keyswitch {
    /// Thin plate under the switch base with holes for posts, contacts, and LED leads.
    ///
    /// Its top face sits at the switch's full depth below the plate face.
    pub fn backplate(&self) -> Result<Node> {
        self.validate()?;
        let slab = checked_cube(
            Vec3::new(
                self.hole_width + BACKPLATE_MARGIN,
                self.hole_length + BACKPLATE_MARGIN,
                self.backplate_thickness,
            ),
            true,
        )?;

        let holes = self
            .family
            .backplate_holes()
            .iter()
            .map(|hole| self.backplate_hole(hole))
            .collect::<Result<Vec<_>>>()?;

        Ok(difference_of(slab, holes)
            .down(self.depth + self.backplate_thickness / 2.0)
            .labeled("backplate"))
    }

    fn backplate_hole(&self, hole: &BackplateHole) -> Result<Node> {
        let drill = cylinder_outer(
            hole.radius,
            self.backplate_thickness + 1.0,
            DEFAULT_SEGMENTS,
            true,
        )?;

        let shape = if hole.slot_length > 0.0 {
            hull_of([
                drill.clone().back(hole.slot_length / 2.0),
                drill.forward(hole.slot_length / 2.0),
            ])
        } else {
            drill
        };

        Ok(shape.translate(Vec3::new(hole.x, hole.y, 0.0)))
    }

    /// Negative shape giving the hot-swap socket room behind the backplate
    pub fn backplate_clearance(&self) -> Result<Node> {
        self.validate()?;
        let block = checked_cube(
            Vec3::new(
                CLEARANCE_WIDTH,
                CLEARANCE_LENGTH,
                self.backplate_clearance_distance,
            ),
            true,
        )?;

        Ok(block.translate(Vec3::new(
            0.0,
            CLEARANCE_LENGTH / 2.0,
            -(self.depth + self.backplate_thickness + self.backplate_clearance_distance / 2.0),
        )))
    }

    /// Full-depth plate with one millimeter of extra depth, joined to the backplate
    pub fn plate_with_backplate(&self) -> Result<Node> {
        Ok(union_of([
            self.plate(PlateOptions::full_depth(1.0))?,
            self.backplate()?,
        ]))
    }
}
