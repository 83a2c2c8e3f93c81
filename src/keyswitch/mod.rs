// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Keyswitch model
//!
//! A [`Keyswitch`] bundles every measurement needed to mount one switch: the plate hole,
//! the clip notches, the backplate, and the body silhouette. Shapes are built by pure
//! functions over that record. Coordinates: X runs left to right, Y front to back, and the
//! top face of the plate sits at `z = 0`.

mod backplate;
mod family;
mod plate;

pub use family::{BackplateHole, HoleRole, SwitchFamily};
pub use plate::PlateOptions;

use crate::ast::Vec2;
use crate::error::{ensure_positive, GeometryError, Result};
use serde::{Deserialize, Serialize};

/// A circular hole at an offset from a mount's center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleDef {
    /// Left to right
    pub x: f64,
    /// Front to back
    pub y: f64,
    pub radius: f64,
}

impl HoleDef {
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("hole radius", self.radius)?;
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(GeometryError::InvalidDescriptor(format!(
                "hole position ({}, {}) is not finite",
                self.x, self.y
            )));
        }
        Ok(())
    }
}

/// Retention clip notch, cut into two opposite walls of the mounting hole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotchProfile {
    /// Plate thickness left above the notch
    pub plate_thickness: f64,
    /// Width at the deepest part of the notch
    pub width: f64,
    /// Width at the edge of the mounting hole
    pub width_outer: f64,
    pub depth: f64,
    pub height: f64,
    pub height_outer: f64,
}

/// Switch body above the plate, for clearance checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Silhouette {
    pub midline_width: f64,
    pub midline_length: f64,
    pub topline_width: f64,
    pub topline_length: f64,
    pub height_above_plate: f64,
}

/// Measurements of one type of keyswitch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyswitch {
    pub family: SwitchFamily,
    /// Left to right size of the mounting hole
    pub hole_width: f64,
    /// Front to back size of the mounting hole
    pub hole_length: f64,
    /// From the base of the switch to the plate face
    pub depth: f64,
    pub plate_thickness: f64,
    pub notch: NotchProfile,
    /// Default thickness of the walls around the mounting hole
    pub wall_thickness: f64,
    pub backplate_thickness: f64,
    /// Depth to clear behind the backplate
    pub backplate_clearance_distance: f64,
    pub silhouette: Silhouette,
    /// Screw holes on the bottom of the mount; when set, walls grow to enclose them
    pub screws: Option<Vec<HoleDef>>,
}

impl Keyswitch {
    pub fn new(family: SwitchFamily) -> Self {
        family.descriptor()
    }

    pub fn mx() -> Self {
        Self::new(SwitchFamily::Mx)
    }

    pub fn choc() -> Self {
        Self::new(SwitchFamily::Choc)
    }

    /// Copy of this descriptor with the given screw holes
    pub fn with_screws(&self, screws: impl IntoIterator<Item = HoleDef>) -> Result<Self> {
        let screws: Vec<HoleDef> = screws.into_iter().collect();
        for screw in &screws {
            screw.validate()?;
        }
        Ok(Self {
            screws: Some(screws),
            ..self.clone()
        })
    }

    /// Check every dimension and the notch taper
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("hole width", self.hole_width),
            ("hole length", self.hole_length),
            ("switch depth", self.depth),
            ("plate thickness", self.plate_thickness),
            ("notch plate thickness", self.notch.plate_thickness),
            ("notch width", self.notch.width),
            ("notch width outer", self.notch.width_outer),
            ("notch depth", self.notch.depth),
            ("notch height", self.notch.height),
            ("notch height outer", self.notch.height_outer),
            ("wall thickness", self.wall_thickness),
            ("backplate thickness", self.backplate_thickness),
            ("backplate clearance distance", self.backplate_clearance_distance),
            ("midline width", self.silhouette.midline_width),
            ("midline length", self.silhouette.midline_length),
            ("topline width", self.silhouette.topline_width),
            ("topline length", self.silhouette.topline_length),
            ("height above plate", self.silhouette.height_above_plate),
        ] {
            ensure_positive(name, value)?;
        }

        if self.notch.width_outer < self.notch.width {
            return Err(GeometryError::InvalidDescriptor(format!(
                "outer notch width {} is narrower than inner width {}",
                self.notch.width_outer, self.notch.width
            )));
        }
        if self.notch.height_outer < self.notch.height {
            return Err(GeometryError::InvalidDescriptor(format!(
                "outer notch height {} is lower than inner height {}",
                self.notch.height_outer, self.notch.height
            )));
        }

        for screw in self.screws.iter().flatten() {
            screw.validate()?;
        }
        Ok(())
    }

    /// Wall thickness used when none is requested explicitly.
    ///
    /// With screw holes set, this is the furthest any screw rim reaches past the mounting
    /// hole edge plus the default wall thickness, and never less than the default.
    pub fn effective_wall_thickness(&self) -> f64 {
        let Some(screws) = &self.screws else {
            return self.wall_thickness;
        };

        let reach = screws
            .iter()
            .flat_map(|screw| {
                [
                    screw.x.abs() - self.hole_width / 2.0 + screw.radius,
                    screw.y.abs() - self.hole_length / 2.0 + screw.radius,
                ]
            })
            .fold(0.0_f64, f64::max);

        let wall = reach + self.wall_thickness;
        tracing::debug!(family = %self.family, screws = screws.len(), wall, "auto-sized wall thickness");
        wall
    }

    /// Outer footprint of a plate segment
    pub fn plate_size(&self, wall_thickness: Option<f64>) -> Vec2 {
        let wall = wall_thickness.unwrap_or_else(|| self.effective_wall_thickness());
        Vec2::new(
            self.hole_width + wall * 2.0,
            self.hole_length + wall * 2.0,
        )
    }

    /// Footprint of a plate segment with the default walls, ignoring screws
    pub fn mount_size(&self) -> Vec2 {
        self.plate_size(Some(self.wall_thickness))
    }
}

impl Default for Keyswitch {
    fn default() -> Self {
        Self::mx()
    }
}
