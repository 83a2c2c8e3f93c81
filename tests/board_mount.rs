// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Board mount post placement

use approx::assert_relative_eq;
use spkb::ast::Evaluator;
use spkb::parts::board_mount::{M2_POST_RADIUS, M2_SHAFT_RADIUS};
use spkb::parts::BoardMount;

fn back_post_centers(mount: &BoardMount) -> Vec<(f64, f64)> {
    let posts = mount.back_mounting_posts(5.0).unwrap();
    let evaluator = Evaluator::new();
    posts
        .find_labeled("back_mounting_post")
        .into_iter()
        .map(|post| evaluator.bounds(post).unwrap().center())
        .map(|c| (c.x, c.y))
        .collect()
}

#[test]
fn test_single_back_post_without_separation() {
    let mount = BoardMount::pro_micro();
    let posts = mount.back_mounting_posts(5.0).unwrap();
    assert_eq!(posts.count_labeled("back_mounting_post"), 1);

    // the post sits just past the far edge, shaft clear of the board plus 0.2 slack
    let bounds = Evaluator::new().bounds(&posts).unwrap();
    assert_relative_eq!(bounds.center().x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(
        bounds.center().y,
        -(mount.board_length + M2_SHAFT_RADIUS + 0.2),
        epsilon = 1e-9
    );
}

#[test]
fn test_two_back_posts_symmetric() {
    let mount = BoardMount::new(20.0, 50.0, 1.6, true, 10.0, Some(11.0)).unwrap();
    let centers = back_post_centers(&mount);
    assert_eq!(centers.len(), 2);

    let shift = M2_POST_RADIUS + 11.0 / 2.0;
    assert_relative_eq!(centers[0].0, -shift, epsilon = 1e-9);
    assert_relative_eq!(centers[1].0, shift, epsilon = 1e-9);
}

#[test]
fn test_render_keeps_board_volume_clear() {
    let mount = BoardMount::stm32_blackpill();
    let bracket = mount.render(5.0).unwrap();
    let evaluator = Evaluator::new();

    let bracket_bounds = evaluator.bounds(&bracket).unwrap();
    assert_relative_eq!(bracket_bounds.min.z, 0.0, epsilon = 1e-9);
    assert_eq!(bracket.count_labeled("back_mounting_post"), 2);
    assert_eq!(bracket.count_labeled("front_mounting_post"), 2);
}

#[test]
fn test_zero_clearance_rejected_for_posts() {
    assert!(BoardMount::pro_micro().back_mounting_posts(0.0).is_err());
    assert!(BoardMount::pro_micro().pcb_only(-1.0).is_err());
}
