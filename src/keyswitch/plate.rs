// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Mounting sockets and plate segments

use super::{HoleDef, Keyswitch};
use crate::ast::{difference_of, hull_of, union_of, Node, Vec3};
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::geometry::{checked_cube, cylinder_outer, DEFAULT_SEGMENTS};

/// Extra height above the plate face so subtraction leaves no stray polygons
const SOCKET_OVERSHOOT: f64 = 1.0;

/// Slab thickness of the switch silhouette cross-sections
const SILHOUETTE_SLICE: f64 = 0.1;

/// How to build a plate segment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlateOptions {
    /// Extend the walls to the full switch depth instead of the plate thickness.
    /// Unset means full depth exactly when screw holes are defined.
    pub full_depth: Option<bool>,
    /// Extra depth added below the walls
    pub extra_depth: f64,
    /// Unset means [`Keyswitch::effective_wall_thickness`]
    pub wall_thickness: Option<f64>,
}

impl PlateOptions {
    pub fn full_depth(extra_depth: f64) -> Self {
        Self {
            full_depth: Some(true),
            extra_depth,
            wall_thickness: None,
        }
    }
}

impl Keyswitch {
    /// Negative volume carving one switch hole: the through-bore plus two clip notches
    pub fn mounting_socket(&self, extra_depth: f64) -> Result<Node> {
        self.validate()?;
        ensure_non_negative("extra depth", extra_depth)?;
        let notch = &self.notch;

        let notch_shape = hull_of([
            Node::centered_cube(notch.width, notch.depth * 2.0, notch.height),
            Node::centered_cube(notch.width_outer, notch.depth * 2.0, notch.height_outer)
                .back(notch.depth),
        ])
        .down(notch.plate_thickness + notch.height / 2.0)
        .forward(self.hole_length / 2.0);

        let bore = checked_cube(
            Vec3::new(
                self.hole_width,
                self.hole_length,
                self.depth + SOCKET_OVERSHOOT + extra_depth,
            ),
            true,
        )?
        .down((self.depth - SOCKET_OVERSHOOT) / 2.0);

        Ok(union_of([bore, notch_shape.clone(), notch_shape.rotate_z(180.0)]).labeled("mounting_socket"))
    }

    /// Segment of plate holding one switch, with the socket and any screw holes cut out
    pub fn plate(&self, options: PlateOptions) -> Result<Node> {
        self.validate()?;
        ensure_non_negative("extra depth", options.extra_depth)?;
        let wall = match options.wall_thickness {
            Some(wall) => ensure_non_negative("wall thickness", wall)?,
            None => self.effective_wall_thickness(),
        };
        let full_depth = options.full_depth.unwrap_or(self.screws.is_some());

        let thickness = if full_depth {
            self.depth
        } else {
            self.plate_thickness
        } + options.extra_depth;

        let size = self.plate_size(Some(wall));
        let slab = checked_cube(Vec3::new(size.x, size.y, thickness), true)?.down(thickness / 2.0);

        let mut cutters = vec![self.mounting_socket(options.extra_depth + 1.0)?];
        for screw in self.screws.iter().flatten() {
            cutters.push(self.screw_hole(screw)?);
        }

        tracing::debug!(
            family = %self.family,
            wall,
            thickness,
            screws = cutters.len() - 1,
            "built switch plate"
        );
        Ok(difference_of(slab, cutters))
    }

    /// Blind screw hole (negative shape) rising from below the plate
    pub fn screw_hole(&self, screw: &HoleDef) -> Result<Node> {
        screw.validate()?;
        Ok(cylinder_outer(
            screw.radius,
            self.depth + self.plate_thickness / 2.0,
            DEFAULT_SEGMENTS,
            true,
        )?
        .translate(Vec3::new(
            screw.x,
            screw.y,
            -(self.depth / 2.0 + self.plate_thickness),
        ))
        .labeled("screw_hole"))
    }

    /// Full-depth plate with through-bores for mounting a single-key PCB.
    ///
    /// The bores run through the whole slab, including `extra_depth`.
    ///
    /// Without an explicit wall thickness, the walls reach `screw_radius` past the screw
    /// center furthest from the mounting hole (and never fall below the default walls).
    pub fn plate_with_board_mount(
        &self,
        screw_positions: &[(f64, f64)],
        screw_radius: f64,
        extra_depth: f64,
        wall_thickness: Option<f64>,
    ) -> Result<Node> {
        ensure_positive("screw radius", screw_radius)?;
        ensure_non_negative("extra depth", extra_depth)?;

        let wall = match wall_thickness {
            Some(wall) => wall,
            None => {
                let reach = screw_positions
                    .iter()
                    .flat_map(|&(x, y)| {
                        [
                            x.abs() - self.hole_width / 2.0,
                            y.abs() - self.hole_length / 2.0,
                        ]
                    })
                    .fold(f64::NEG_INFINITY, f64::max);
                (reach + screw_radius).max(self.wall_thickness)
            }
        };

        let bare = Keyswitch {
            screws: None,
            ..self.clone()
        };
        let plate = bare.plate(PlateOptions {
            full_depth: Some(true),
            extra_depth,
            wall_thickness: Some(wall),
        })?;

        let slab_depth = self.depth + extra_depth;
        let bore = cylinder_outer(
            screw_radius,
            slab_depth + self.plate_thickness / 2.0,
            DEFAULT_SEGMENTS,
            true,
        )?
        .down(slab_depth / 2.0);

        let bores = screw_positions
            .iter()
            .map(|&(x, y)| bore.clone().translate(Vec3::new(x, y, 0.0)).labeled("screw_hole"));

        Ok(difference_of(plate, bores))
    }

    /// Simplified body of the switch above the plate, lofted between two cross-sections.
    ///
    /// For clearance checks only; never cut this from a plate.
    pub fn switch_silhouette(&self) -> Node {
        let body = &self.silhouette;
        hull_of([
            Node::centered_cube(body.midline_width, body.midline_length, SILHOUETTE_SLICE)
                .up(SILHOUETTE_SLICE / 2.0),
            Node::centered_cube(body.topline_width, body.topline_length, SILHOUETTE_SLICE)
                .up(body.height_above_plate - SILHOUETTE_SLICE / 2.0),
        ])
        .labeled("keyswitch")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Evaluator, NodeKind};
    use approx::assert_relative_eq;

    #[test]
    fn test_socket_has_two_opposing_notches() {
        let socket = Keyswitch::mx().mounting_socket(0.0).unwrap();
        let NodeKind::Union(parts) = &socket.kind else {
            panic!("socket should be a union");
        };
        assert_eq!(parts.len(), 3);
        match &parts[2].kind {
            NodeKind::Transform { op, children } => {
                assert_eq!(*op, crate::ast::TransformOp::Rotate(Vec3::new(0.0, 0.0, 180.0)));
                assert_eq!(children[0], parts[1]);
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn test_socket_bore_reaches_above_plate() {
        let switch = Keyswitch::mx();
        let bounds = Evaluator::new().bounds(&switch.mounting_socket(1.0).unwrap()).unwrap();
        assert!(bounds.max.z > 0.0);
        assert_relative_eq!(bounds.size().x, switch.hole_width, epsilon = 1e-9);
        assert!(bounds.min.z < -switch.depth);
    }

    #[test]
    fn test_thin_plate_bounds() {
        let switch = Keyswitch::mx();
        let plate = switch.plate(PlateOptions::default()).unwrap();
        let bounds = Evaluator::new().bounds(&plate).unwrap();
        assert_relative_eq!(bounds.max.z, 0.0);
        assert_relative_eq!(bounds.min.z, -switch.plate_thickness);
        assert_relative_eq!(bounds.size().x, 17.0);
        assert_relative_eq!(bounds.size().y, 17.0);
    }

    #[test]
    fn test_screws_default_to_full_depth() {
        let switch = Keyswitch::mx()
            .with_screws([HoleDef::new(-8.0, -8.0, 0.5), HoleDef::new(8.0, 8.0, 0.5)])
            .unwrap();
        let plate = switch.plate(PlateOptions::default()).unwrap();
        let bounds = Evaluator::new().bounds(&plate).unwrap();
        assert_relative_eq!(bounds.min.z, -switch.depth);
        assert_relative_eq!(bounds.size().x, 20.0);
        assert_eq!(plate.count_labeled("screw_hole"), 2);
    }

    #[test]
    fn test_explicit_wall_thickness_wins() {
        let plate = Keyswitch::mx()
            .plate(PlateOptions {
                wall_thickness: Some(4.0),
                ..Default::default()
            })
            .unwrap();
        let bounds = Evaluator::new().bounds(&plate).unwrap();
        assert_relative_eq!(bounds.size().x, 22.0);
    }

    #[test]
    fn test_negative_wall_rejected() {
        let result = Keyswitch::mx().plate(PlateOptions {
            wall_thickness: Some(-1.0),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_board_mount_bores_pass_through_extra_depth() {
        let switch = Keyswitch::mx();
        let evaluator = Evaluator::new();
        for extra_depth in [0.0, 2.0, 10.0] {
            let mount = switch
                .plate_with_board_mount(&[(8.0, 8.0)], 0.5, extra_depth, None)
                .unwrap();
            let plate = evaluator.bounds(&mount).unwrap();
            let holes = mount.find_labeled("screw_hole");
            assert_eq!(holes.len(), 1);
            let bore = evaluator.bounds(holes[0]).unwrap();
            assert_relative_eq!(plate.min.z, -(switch.depth + extra_depth), epsilon = 1e-9);
            assert!(bore.min.z <= plate.min.z, "bore stops inside the slab at {}", extra_depth);
            assert!(bore.max.z >= plate.max.z);
        }
    }

    #[test]
    fn test_invalid_descriptor_never_builds() {
        let mut switch = Keyswitch::mx();
        switch.notch.width_outer = 2.0;
        assert!(matches!(
            switch.plate(PlateOptions::default()),
            Err(crate::error::GeometryError::InvalidDescriptor(_))
        ));
        assert!(switch.mounting_socket(0.0).is_err());
        assert!(switch.plate_with_board_mount(&[(8.0, 8.0)], 0.5, 0.0, None).is_err());

        let mut switch = Keyswitch::choc();
        switch.depth = -1.0;
        assert!(switch.plate(PlateOptions::full_depth(0.0)).is_err());
    }

    #[test]
    fn test_silhouette_sits_on_plate() {
        for switch in [Keyswitch::mx(), Keyswitch::choc()] {
            let bounds = Evaluator::new().bounds(&switch.switch_silhouette()).unwrap();
            assert_relative_eq!(bounds.min.z, 0.0, epsilon = 1e-12);
            assert_relative_eq!(
                bounds.max.z,
                switch.silhouette.height_above_plate,
                epsilon = 1e-12
            );
        }
    }
}
