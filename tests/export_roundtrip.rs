// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Round-trip export/parse tests

use anyhow::Result;
use spkb::ast::{difference_of, hull_of, intersection_of, union_of, Evaluator, Node, NodeKind, Vec3};
use spkb::catalog::Part;
use spkb::config::RenderConfig;
use spkb::io;
use spkb::keyswitch::{Keyswitch, SwitchFamily};
use tempfile::tempdir;

#[test]
fn test_roundtrip_every_catalog_part() -> Result<()> {
    for family in SwitchFamily::ALL {
        let switch = Keyswitch::new(family);
        for part in Part::ALL {
            let node = part.build(&switch)?;
            let parsed = io::parse_scad(&io::to_scad(&node))?;
            assert_eq!(parsed, node, "{} ({}) did not survive a round trip", part, family);
        }
    }
    Ok(())
}

#[test]
fn test_roundtrip_keeps_difference_order() -> Result<()> {
    let a = Node::cube(1.0, 1.0, 1.0);
    let b = Node::cube(1.0, 1.0, 1.0).right(0.5);

    let ab = io::parse_scad(&io::to_scad(&difference_of(a.clone(), [b.clone()])))?;
    let ba = io::parse_scad(&io::to_scad(&difference_of(b.clone(), [a.clone()])))?;

    match (&ab.kind, &ba.kind) {
        (NodeKind::Difference(first), NodeKind::Difference(second)) => {
            assert_eq!(first, &vec![a.clone(), b.clone()]);
            assert_eq!(second, &vec![b, a]);
        }
        other => panic!("unexpected nodes: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_roundtrip_keeps_disjoint_difference_order() -> Result<()> {
    let a = Node::cube(1.0, 1.0, 1.0);
    let b = Node::cube(1.0, 1.0, 1.0).right(5.0);
    let evaluator = Evaluator::new();

    let ab = io::parse_scad(&io::to_scad(&difference_of(a.clone(), [b.clone()])))?;
    let ba = io::parse_scad(&io::to_scad(&difference_of(b.clone(), [a.clone()])))?;

    assert_ne!(ab, ba);
    assert_eq!(ab.children(), &[a.clone(), b.clone()]);
    assert_eq!(ba.children(), &[b.clone(), a.clone()]);
    // nothing overlaps, so each difference keeps exactly its first operand
    assert_eq!(evaluator.bounds(&ab), evaluator.bounds(&a));
    assert_eq!(evaluator.bounds(&ba), evaluator.bounds(&b));
    Ok(())
}

#[test]
fn test_roundtrip_awkward_values() -> Result<()> {
    let node = union_of([
        intersection_of([
            Node::centered_cube(0.1, 1e-7, 123456.789),
            Node::cylinder(5.08, 1.9939 / (std::f64::consts::PI / 16.0).cos(), 0.0, 16, true),
        ]),
        hull_of([Node::polygon([(0.0, 0.0), (-2.5, 1.0 / 3.0), (1.0, 1.0)]).linear_extrude(0.1)]),
        Node::cube(1.0, 2.0, 3.0)
            .rotate_about(33.3, Vec3::new(1.0, 1.0, 0.0))
            .mirror(Vec3::new(0.0, 1.0, 0.0))
            .color([220.0 / 255.0, 163.0 / 255.0, 163.0 / 255.0, 1.0])
            .labeled("odd one"),
        union_of([]),
    ]);

    assert_eq!(io::parse_scad(&io::to_scad(&node))?, node);
    Ok(())
}

#[test]
fn test_exported_file_reimports() -> Result<()> {
    let dir = tempdir()?;
    let config = RenderConfig {
        segments: 64,
        ..RenderConfig::default()
    };
    let node = Keyswitch::choc().plate_with_backplate()?;
    let path = dir.path().join("plate.scad");

    io::export_scad(&node, &path, &config)?;
    let document = io::import_scad_document(&path)?;

    assert_eq!(document.segments(), Some(64));
    assert_eq!(document.root, node);
    Ok(())
}
