// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Parts built around a keyswitch: board mounts, keycaps and single-key PCBs

pub mod board_mount;
pub mod keycaps;
pub mod single_key_pcb;

pub use board_mount::{mount_post_m2, BoardMount};
pub use keycaps::{sa_cap, KeySize};
pub use single_key_pcb::{pcb_hole_positions, single_key_board};
