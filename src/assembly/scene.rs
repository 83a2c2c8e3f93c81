// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Preview scenes combining several parts

use crate::ast::{union_of, Node, Rgba};
use crate::error::Result;
use crate::keyswitch::{Keyswitch, PlateOptions};
use crate::parts::{sa_cap, BoardMount, KeySize};

const BRACKET_COLOR: Rgba = [0.2, 0.2, 0.2, 1.0];
const BOARD_COLOR: Rgba = [0.0, 0.4, 0.0, 1.0];
const SWITCH_COLOR: Rgba = [0.9, 0.9, 0.9, 1.0];

/// Spacing between keycaps in [`keycap_row`]
const KEYCAP_PITCH: f64 = 30.0;
/// Height at which the second bracket floats in [`board_mount_preview`]
const EXPLODED_OFFSET: f64 = 20.0;

/// One keycap of each supported size, side by side
pub fn keycap_row() -> Node {
    union_of([
        sa_cap(KeySize::One).left(KEYCAP_PITCH),
        sa_cap(KeySize::OneAndHalf),
        sa_cap(KeySize::Two).right(KEYCAP_PITCH),
    ])
}

/// A bracket on its own, and a second one raised with the board sitting in it
pub fn board_mount_preview(mount: &BoardMount, clearance: f64) -> Result<Node> {
    let bracket = mount.render(clearance)?.color(BRACKET_COLOR);
    let fitted = union_of([
        bracket.clone(),
        mount.board_profile(clearance)?.color(BOARD_COLOR),
    ]);

    Ok(union_of([bracket, fitted.up(EXPLODED_OFFSET)]))
}

/// Plate segment with the switch body and a keycap in place
pub fn switch_preview(switch: &Keyswitch, size: KeySize) -> Result<Node> {
    Ok(union_of([
        switch.plate(PlateOptions::default())?,
        switch.switch_silhouette().color(SWITCH_COLOR),
        sa_cap(size),
    ]))
}
