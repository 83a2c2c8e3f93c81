// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! SCAD file importer

use super::parser::{parse_document, ScadDocument};
use crate::ast::Node;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Import a .scad file and parse it into an AST
pub fn import_scad_file(path: impl AsRef<Path>) -> Result<Node> {
    Ok(import_scad_document(path)?.root)
}

/// Import a .scad file, keeping its top-level settings
pub fn import_scad_document(path: impl AsRef<Path>) -> Result<ScadDocument> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read SCAD file: {:?}", path))?;

    let document =
        parse_document(&source).with_context(|| format!("Failed to parse SCAD file: {:?}", path))?;
    tracing::debug!(path = %path.display(), settings = document.settings.len(), "imported scad file");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_scad_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "$fn = 24;")?;
        writeln!(file, "cube([10, 10, 10]);")?;

        let document = import_scad_document(file.path())?;
        assert_eq!(document.segments(), Some(24));
        assert_eq!(document.root, Node::cube(10.0, 10.0, 10.0));

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = import_scad_file("/nonexistent/part.scad").unwrap_err();
        assert!(err.to_string().contains("Failed to read SCAD file"));
    }
}
