// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Assemblies: tester jigs and preview scenes

pub mod scene;
pub mod tester;

pub use scene::{board_mount_preview, keycap_row, switch_preview};
pub use tester::{grid_tester, single_tester, Margins, Tester, TesterLayout};
