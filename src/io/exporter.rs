// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! OpenSCAD exporter
//!
//! Every node becomes one statement. Labels are written as `//@label` comments on the line
//! before the statement they belong to, which OpenSCAD ignores and [`super::parse_scad`]
//! reads back.

use crate::ast::{Node, NodeKind, TransformOp, Vec2, Vec3};
use crate::config::RenderConfig;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

const INDENT: &str = "  ";

/// Serialize a tree to OpenSCAD source, without any header
pub fn to_scad(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

/// Full file contents: optional header comment, `$fn`, then the tree
pub fn render_scad(node: &Node, config: &RenderConfig) -> String {
    let mut out = String::new();
    if config.header {
        let _ = writeln!(
            out,
            "// Generated by spkb {}; do not edit by hand",
            env!("CARGO_PKG_VERSION")
        );
    }
    let _ = writeln!(out, "$fn = {};", config.segments);
    out.push('\n');
    write_node(&mut out, node, 0);
    out
}

/// Write a tree to `path` as an OpenSCAD file, creating parent directories as needed
pub fn export_scad(node: &Node, path: impl AsRef<Path>, config: &RenderConfig) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }

    let source = render_scad(node, config);
    std::fs::write(path, &source)
        .with_context(|| format!("Failed to write SCAD file: {:?}", path))?;

    tracing::info!(path = %path.display(), bytes = source.len(), "wrote scad file");
    Ok(())
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = INDENT.repeat(depth);
    if let Some(id) = &node.id {
        // A label must stay on one line
        let _ = writeln!(out, "{}//@{}", indent, id.replace(['\r', '\n'], " "));
    }

    out.push_str(&indent);
    match &node.kind {
        NodeKind::Cube { size, center } => {
            let _ = writeln!(out, "cube(size = {}, center = {});", vec3(size), center);
        }
        NodeKind::Cylinder {
            h,
            r1,
            r2,
            fn_,
            center,
        } => {
            let _ = write!(out, "cylinder(h = {}, r1 = {}, r2 = {}, center = {}", h, r1, r2, center);
            if *fn_ > 0 {
                let _ = write!(out, ", $fn = {}", fn_);
            }
            out.push_str(");\n");
        }
        NodeKind::Polygon(points) => {
            let points: Vec<String> = points.iter().map(vec2).collect();
            let _ = writeln!(out, "polygon(points = [{}]);", points.join(", "));
        }
        NodeKind::LinearExtrude {
            height,
            center,
            children,
        } => {
            let call = format!("linear_extrude(height = {}, center = {})", height, center);
            write_block(out, &call, children, depth);
        }
        NodeKind::Union(children) => write_block(out, "union()", children, depth),
        NodeKind::Difference(children) => write_block(out, "difference()", children, depth),
        NodeKind::Intersection(children) => write_block(out, "intersection()", children, depth),
        NodeKind::Hull(children) => write_block(out, "hull()", children, depth),
        NodeKind::Transform { op, children } => {
            let call = match op {
                TransformOp::Translate(v) => format!("translate({})", vec3(v)),
                TransformOp::Rotate(angles) => format!("rotate({})", vec3(angles)),
                TransformOp::RotateAbout { angle, axis } => {
                    format!("rotate(a = {}, v = {})", angle, vec3(axis))
                }
                TransformOp::Mirror(normal) => format!("mirror({})", vec3(normal)),
            };
            write_block(out, &call, children, depth);
        }
        NodeKind::Color { rgba, children } => {
            let call = format!(
                "color([{}, {}, {}, {}])",
                rgba[0], rgba[1], rgba[2], rgba[3]
            );
            write_block(out, &call, children, depth);
        }
    }
}

fn write_block(out: &mut String, call: &str, children: &[Node], depth: usize) {
    if children.is_empty() {
        let _ = writeln!(out, "{} {{}}", call);
        return;
    }

    let _ = writeln!(out, "{} {{", call);
    for child in children {
        write_node(out, child, depth + 1);
    }
    let _ = writeln!(out, "{}}}", INDENT.repeat(depth));
}

fn vec3(v: &Vec3) -> String {
    format!("[{}, {}, {}]", v.x, v.y, v.z)
}

fn vec2(v: &Vec2) -> String {
    format!("[{}, {}]", v.x, v.y)
}
