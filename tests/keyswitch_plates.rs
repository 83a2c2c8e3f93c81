// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Plate, backplate and screw-hole behavior across switch families

use approx::assert_relative_eq;
use spkb::ast::Evaluator;
use spkb::geometry::{cylinder_outer, fudge_radius, nothing, optional, Radius};
use spkb::keyswitch::{HoleDef, Keyswitch, PlateOptions, SwitchFamily};
use spkb::parts::pcb_hole_positions;
use spkb::GeometryError;

#[test]
fn test_too_few_segments_rejected() {
    assert!(matches!(
        cylinder_outer(1.0, 1.0, 2, false),
        Err(GeometryError::TooFewSegments(2))
    ));
    assert!(fudge_radius(1.0, 3).is_ok());
}

#[test]
fn test_fudged_radius_never_undersized() {
    let mut previous = f64::INFINITY;
    for segments in 3..200 {
        let Radius::Uniform(r) = fudge_radius(2.0, segments).unwrap() else {
            panic!("uniform radius expected");
        };
        assert!(r > 2.0);
        assert!(r < previous);
        previous = r;
    }
}

#[test]
fn test_optional_inclusion() {
    let plate = Keyswitch::mx().plate(PlateOptions::default()).unwrap();
    assert_eq!(optional(true)(plate.clone()), plate);
    assert_eq!(optional(false)(plate), nothing());
    assert!(Evaluator::new().bounds(&nothing()).is_none());
}

#[test]
fn test_plate_thickness_policy() {
    let evaluator = Evaluator::new();
    for family in SwitchFamily::ALL {
        let switch = Keyswitch::new(family);

        let thin = evaluator
            .bounds(&switch.plate(PlateOptions::default()).unwrap())
            .unwrap();
        assert_relative_eq!(thin.size().z, switch.plate_thickness, epsilon = 1e-12);

        let deep = evaluator
            .bounds(&switch.plate(PlateOptions::full_depth(2.0)).unwrap())
            .unwrap();
        assert_relative_eq!(deep.size().z, switch.depth + 2.0, epsilon = 1e-12);
        assert_relative_eq!(deep.max.z, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_far_screws_never_shrink_walls() {
    let switch = Keyswitch::mx();
    let screwed = switch
        .with_screws(pcb_hole_positions().map(|(x, y)| HoleDef::new(x, y, 0.5)))
        .unwrap();
    assert!(screwed.effective_wall_thickness() >= switch.wall_thickness);

    let plate = switch
        .plate_with_board_mount(&[(30.0, 0.0), (-30.0, 0.0)], 0.5, 0.0, None)
        .unwrap();
    let bounds = Evaluator::new().bounds(&plate).unwrap();
    // 30 - 7 + 0.5 past each hole edge
    assert_relative_eq!(bounds.size().x, 14.0 + 2.0 * 23.5, epsilon = 1e-9);
    assert_eq!(plate.count_labeled("screw_hole"), 2);
}

#[test]
fn test_close_screws_keep_default_walls() {
    let switch = Keyswitch::choc();
    let plate = switch
        .plate_with_board_mount(&[(2.0, 2.0)], 0.5, 0.0, None)
        .unwrap();
    let bounds = Evaluator::new().bounds(&plate).unwrap();
    assert_relative_eq!(bounds.size().x, switch.mount_size().x, epsilon = 1e-9);
    assert_relative_eq!(bounds.min.z, -switch.depth, epsilon = 1e-12);
}

#[test]
fn test_screw_holes_follow_axes() {
    let switch = Keyswitch::mx();
    let hole = switch.screw_hole(&HoleDef::new(8.0, -3.0, 0.5)).unwrap();
    let center = Evaluator::new().bounds(&hole).unwrap().center();
    assert_relative_eq!(center.x, 8.0, epsilon = 1e-12);
    assert_relative_eq!(center.y, -3.0, epsilon = 1e-12);
}

#[test]
fn test_invalid_descriptor_rejected() {
    let mut switch = Keyswitch::mx();
    switch.depth = 0.0;
    assert!(matches!(
        switch.validate(),
        Err(GeometryError::NonPositiveDimension { .. })
    ));
}

#[test]
fn test_edited_descriptor_rejected_by_builders() {
    let mut switch = Keyswitch::mx();
    switch.notch.width_outer = 2.0;
    assert!(switch.validate().is_err());
    assert!(matches!(
        switch.plate(PlateOptions::default()),
        Err(GeometryError::InvalidDescriptor(_))
    ));
    assert!(switch.backplate().is_err());
}

#[test]
fn test_board_mount_bores_clear_extra_depth() {
    let switch = Keyswitch::mx();
    let mount = switch
        .plate_with_board_mount(&pcb_hole_positions(), 0.5, 2.0, None)
        .unwrap();
    let evaluator = Evaluator::new();
    let plate = evaluator.bounds(&mount).unwrap();
    for bore in mount.find_labeled("screw_hole") {
        let bore = evaluator.bounds(bore).unwrap();
        assert!(bore.min.z <= plate.min.z);
        assert!(bore.max.z >= plate.max.z);
    }
}
