// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! I/O module - OpenSCAD export, parsing, and importing

mod exporter;
mod importer;
mod parser;

pub use exporter::{export_scad, render_scad, to_scad};
pub use importer::{import_scad_document, import_scad_file};
pub use parser::{parse_document, parse_scad, ScadDocument};
