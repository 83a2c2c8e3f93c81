// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Switch tester jigs
//!
//! A tester is a rectangular wall enclosure holding a grid of switch plates. Each plate
//! carries four spacer tabs that bridge to its neighbours and to the walls. The plate tops
//! sit flush with the top of the walls.

use crate::ast::{union_of, Node, Vec3};
use crate::error::{ensure_non_negative, ensure_positive, GeometryError, Result};
use crate::geometry::checked_cube;
use crate::keyswitch::{Keyswitch, PlateOptions};

/// Height of the walls above the switch base
const WALL_HEIGHT_ABOVE_SWITCH: f64 = 15.0;

/// Spacing and wall measurements of a tester
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TesterLayout {
    /// Gap between neighbouring plates, and between plates and walls
    pub switch_spacing: f64,
    pub wall_thickness: f64,
    pub wall_height: f64,
}

impl TesterLayout {
    /// Tight layout for multi-switch grids
    pub fn grid(switch: &Keyswitch) -> Self {
        Self {
            switch_spacing: 2.0,
            wall_thickness: 3.0,
            wall_height: switch.depth + WALL_HEIGHT_ABOVE_SWITCH,
        }
    }

    /// Roomy layout for a one-switch tester
    pub fn single(switch: &Keyswitch) -> Self {
        Self {
            switch_spacing: 10.0,
            wall_thickness: 5.0,
            wall_height: switch.depth + WALL_HEIGHT_ABOVE_SWITCH,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("switch spacing", self.switch_spacing)?;
        ensure_positive("wall thickness", self.wall_thickness)?;
        ensure_positive("wall height", self.wall_height)?;
        Ok(())
    }
}

/// Extra room between the outermost plates and the walls
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    /// Added at the front and at the back
    pub length: f64,
    /// Added at the left and at the right
    pub width: f64,
}

/// Builds testers for one switch type
#[derive(Debug, Clone)]
pub struct Tester {
    switch: Keyswitch,
    layout: TesterLayout,
}

impl Tester {
    pub fn new(switch: Keyswitch, layout: TesterLayout) -> Result<Self> {
        switch.validate()?;
        layout.validate()?;
        Ok(Self { switch, layout })
    }

    /// Tester using the grid layout
    pub fn grid(switch: Keyswitch) -> Result<Self> {
        let layout = TesterLayout::grid(&switch);
        Self::new(switch, layout)
    }

    pub fn layout(&self) -> &TesterLayout {
        &self.layout
    }

    /// Outer (length, width) of the wall enclosure: along Y, then along X
    pub fn wall_dimensions(
        &self,
        length_units: u32,
        width_units: u32,
        margins: Margins,
    ) -> Result<(f64, f64)> {
        if length_units == 0 || width_units == 0 {
            return Err(GeometryError::EmptyGrid {
                length_units,
                width_units,
            });
        }
        ensure_non_negative("length margin", margins.length)?;
        ensure_non_negative("width margin", margins.width)?;

        let mount = self.switch.mount_size();
        let spacing = self.layout.switch_spacing;
        let wall_length =
            (mount.y + spacing) * f64::from(length_units) + spacing + 2.0 * margins.length;
        let wall_width =
            (mount.x + spacing) * f64::from(width_units) + spacing + 2.0 * margins.width;
        Ok((wall_length, wall_width))
    }

    /// Four walls around the grid, standing on `z = 0`
    pub fn walls(&self, length_units: u32, width_units: u32, margins: Margins) -> Result<Node> {
        let (wall_length, wall_width) = self.wall_dimensions(length_units, width_units, margins)?;
        let TesterLayout {
            wall_thickness,
            wall_height,
            ..
        } = self.layout;

        let top_wall = checked_cube(Vec3::new(wall_width, wall_thickness, wall_height), true)?
            .forward((wall_length - wall_thickness) / 2.0);
        let left_wall = checked_cube(Vec3::new(wall_thickness, wall_length, wall_height), true)?
            .left((wall_width - wall_thickness) / 2.0);

        Ok(union_of([
            top_wall.clone(),
            left_wall.clone(),
            top_wall.rotate_z(180.0),
            left_wall.rotate_z(180.0),
        ])
        .up(wall_height / 2.0)
        .labeled("tester_walls"))
    }

    /// A thin switch plate with a spacer tab on each side, top face at `z = 0`
    pub fn spaced_switch_plate(&self) -> Result<Node> {
        let mount = self.switch.mount_size();
        let spacing = self.layout.switch_spacing;
        let thickness = self.switch.plate_thickness;
        let reach = mount.x.max(mount.y);

        let spacer = checked_cube(Vec3::new(reach + 2.0 * spacing, spacing, thickness), true)?
            .down(thickness / 2.0)
            .forward((reach + spacing) / 2.0);

        let mut parts = vec![self.switch.plate(PlateOptions {
            full_depth: Some(false),
            ..PlateOptions::default()
        })?];
        parts.extend([0.0, 90.0, 180.0, 270.0].map(|angle| spacer.clone().rotate_z(angle)));

        Ok(union_of(parts).labeled("spaced_switch_plate"))
    }

    /// `length_units` rows (along Y) by `width_units` columns (along X), centered on the origin
    pub fn build(&self, length_units: u32, width_units: u32, margins: Margins) -> Result<Node> {
        let walls = self.walls(length_units, width_units, margins)?;

        let mount = self.switch.mount_size();
        let spacing = self.layout.switch_spacing;
        let x_pitch = mount.x + spacing;
        let y_pitch = mount.y + spacing;

        let cell = self.spaced_switch_plate()?;
        let mut plates = Vec::new();
        for row in 0..length_units {
            for column in 0..width_units {
                plates.push(
                    cell.clone()
                        .left(x_pitch * f64::from(column))
                        .forward(y_pitch * f64::from(row)),
                );
            }
        }

        tracing::debug!(
            length_units,
            width_units,
            plates = plates.len(),
            "built tester grid"
        );

        let grid = union_of(plates)
            .back(y_pitch * f64::from(length_units - 1) / 2.0)
            .right(x_pitch * f64::from(width_units - 1) / 2.0)
            .up(self.layout.wall_height);

        Ok(union_of([walls, grid]))
    }
}

/// Grid tester with the grid layout
pub fn grid_tester(
    switch: &Keyswitch,
    length_units: u32,
    width_units: u32,
    margins: Margins,
) -> Result<Node> {
    Tester::grid(switch.clone())?.build(length_units, width_units, margins)
}

/// One-switch tester: the 1x1 grid with the roomy layout
pub fn single_tester(switch: &Keyswitch) -> Result<Node> {
    Tester::new(switch.clone(), TesterLayout::single(switch))?.build(1, 1, Margins::default())
}
