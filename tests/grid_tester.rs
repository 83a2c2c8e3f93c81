// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Tester footprints and plate placement

use approx::assert_relative_eq;
use spkb::assembly::{grid_tester, single_tester, Margins, Tester, TesterLayout};
use spkb::ast::Evaluator;
use spkb::keyswitch::Keyswitch;
use spkb::GeometryError;

#[test]
fn test_two_by_three_footprint() {
    let switch = Keyswitch::mx();
    let tester = Tester::grid(switch.clone()).unwrap();
    let (length, width) = tester.wall_dimensions(2, 3, Margins::default()).unwrap();

    // (17 + 2) * units + 2
    assert_relative_eq!(length, 40.0);
    assert_relative_eq!(width, 59.0);

    let node = grid_tester(&switch, 2, 3, Margins::default()).unwrap();
    assert_eq!(node.count_labeled("spaced_switch_plate"), 6);

    let bounds = Evaluator::new().bounds(&node).unwrap();
    assert_relative_eq!(bounds.size().x, 59.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.size().y, 40.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.center().x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.center().y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_plates_flush_with_wall_tops() {
    let switch = Keyswitch::choc();
    let layout = TesterLayout::grid(&switch);
    let node = grid_tester(&switch, 1, 4, Margins::default()).unwrap();
    let evaluator = Evaluator::new();

    for plate in node.find_labeled("spaced_switch_plate") {
        // labeled cells are untranslated; their tops sit at z = 0 before the grid is raised
        let bounds = evaluator.bounds(plate).unwrap();
        assert_relative_eq!(bounds.max.z, 0.0, epsilon = 1e-12);
    }
    let bounds = evaluator.bounds(&node).unwrap();
    assert_relative_eq!(bounds.max.z, layout.wall_height, epsilon = 1e-12);
}

#[test]
fn test_margins_widen_walls() {
    let switch = Keyswitch::mx();
    let margins = Margins {
        length: 5.0,
        width: 2.5,
    };
    let bounds = Evaluator::new()
        .bounds(&grid_tester(&switch, 2, 3, margins).unwrap())
        .unwrap();
    assert_relative_eq!(bounds.size().y, 50.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.size().x, 64.0, epsilon = 1e-9);
}

#[test]
fn test_single_tester_is_one_cell() {
    let node = single_tester(&Keyswitch::mx()).unwrap();
    assert_eq!(node.count_labeled("spaced_switch_plate"), 1);
    assert_eq!(node.count_labeled("tester_walls"), 1);
}

#[test]
fn test_empty_grid_rejected() {
    assert!(matches!(
        grid_tester(&Keyswitch::mx(), 3, 0, Margins::default()),
        Err(GeometryError::EmptyGrid { .. })
    ));
}
