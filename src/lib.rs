// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! spkb - parametric keyboard parts
//!
//! Builds switch plates, backplates, board mounts, keycap approximations and tester jigs as
//! immutable CSG trees, and writes them as OpenSCAD source for an external renderer.
//! Nothing here meshes geometry.
//!
//! ```
//! use spkb::keyswitch::{Keyswitch, PlateOptions};
//!
//! let plate = Keyswitch::mx().plate(PlateOptions::default()).unwrap();
//! let scad = spkb::io::to_scad(&plate);
//! assert_eq!(spkb::parse_scad(&scad).unwrap(), plate);
//! ```

pub mod assembly;
pub mod ast;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod keyswitch;
pub mod parts;

pub use ast::{difference_of, hull_of, intersection_of, union_of, Node, NodeKind, TransformOp};
pub use config::RenderConfig;
pub use error::{GeometryError, Result};
pub use io::{export_scad, import_scad_file, parse_scad, to_scad};
pub use keyswitch::{Keyswitch, SwitchFamily};

/// Build a catalog part for the configured switch and write it to the configured directory
pub fn render_part(part: catalog::Part, config: &RenderConfig) -> anyhow::Result<std::path::PathBuf> {
    let node = part.build(&Keyswitch::new(config.switch))?;
    let path = config.output_path(part.name());
    export_scad(&node, &path, config)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_part() {
        let dir = tempdir().unwrap();
        let config = RenderConfig {
            output_dir: dir.path().to_path_buf(),
            ..RenderConfig::default()
        };

        let path = render_part(catalog::Part::Plate, &config).unwrap();
        assert_eq!(path, dir.path().join("plate.scad"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("$fn = 48;"));
        assert!(written.contains("//@mounting_socket"));
    }
}
