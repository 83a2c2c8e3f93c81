// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! OpenSCAD parser using pest

use crate::ast::{Node, NodeKind, Rgba, TransformOp, Vec2, Vec3};
use anyhow::{anyhow, bail, Context, Result};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::collections::{BTreeMap, HashMap};

#[derive(Parser)]
#[grammar = "io/scad.pest"]
struct ScadParser;

/// OpenSCAD's default `linear_extrude` height
const DEFAULT_EXTRUDE_HEIGHT: f64 = 100.0;

/// A parsed file: its top-level settings and its geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ScadDocument {
    /// Top-level special variables such as `$fn`
    pub settings: BTreeMap<String, f64>,
    pub root: Node,
}

impl ScadDocument {
    /// Global `$fn`, if the file sets one
    pub fn segments(&self) -> Option<u32> {
        self.settings
            .get("$fn")
            .filter(|n| n.is_finite() && **n >= 0.0)
            .map(|n| *n as u32)
    }
}

/// Parse OpenSCAD source code into an AST
pub fn parse_scad(source: &str) -> Result<Node> {
    Ok(parse_document(source)?.root)
}

/// Parse OpenSCAD source, keeping top-level settings.
///
/// A single top-level statement is returned as is; several become a union, and none gives
/// an empty union.
pub fn parse_document(source: &str) -> Result<ScadDocument> {
    let program = ScadParser::parse(Rule::program, source)
        .context("Failed to parse SCAD source")?
        .next()
        .ok_or_else(|| anyhow!("Empty parse result"))?;

    let mut settings = BTreeMap::new();
    let mut statements = Vec::new();

    for pair in program.into_inner() {
        match pair.as_rule() {
            Rule::setting => {
                let mut inner = pair.into_inner();
                let name = next_pair(&mut inner, "setting name")?.as_str().to_string();
                let value = parse_expr(next_pair(&mut inner, "setting value")?)?;
                settings.insert(name.clone(), value.as_number(&name)?);
            }
            Rule::statement => statements.push(parse_statement(pair)?),
            _ => {}
        }
    }

    let root = if statements.len() == 1 {
        statements.remove(0)
    } else {
        Node::new(NodeKind::Union(statements))
    };

    Ok(ScadDocument { settings, root })
}

fn next_pair<'i>(
    pairs: &mut pest::iterators::Pairs<'i, Rule>,
    what: &str,
) -> Result<Pair<'i, Rule>> {
    pairs.next().ok_or_else(|| anyhow!("Missing {}", what))
}

fn parse_statement(pair: Pair<Rule>) -> Result<Node> {
    let (line, _) = pair.as_span().start_pos().line_col();

    let mut id = None;
    let mut call = None;
    let mut children = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::label => {
                id = inner
                    .into_inner()
                    .next()
                    .map(|text| text.as_str().to_string());
            }
            Rule::call => call = Some(inner),
            Rule::block => {
                for stmt in inner.into_inner() {
                    children.push(parse_statement(stmt)?);
                }
            }
            Rule::statement => children.push(parse_statement(inner)?),
            _ => {}
        }
    }

    let call = call.ok_or_else(|| anyhow!("Statement without a module call at line {}", line))?;
    let mut call_inner = call.into_inner();
    let module = next_pair(&mut call_inner, "module name")?.as_str().to_string();
    let params = match call_inner.next() {
        Some(args) => parse_args(args)?,
        None => Params::default(),
    };

    let kind = build_kind(&module, &params, children)
        .with_context(|| format!("Invalid `{}` call at line {}", module, line))?;

    Ok(Node { kind, id })
}

fn build_kind(module: &str, params: &Params, children: Vec<Node>) -> Result<NodeKind> {
    let kind = match module {
        "cube" => {
            let size = match params.get("size", 0) {
                Some(Value::Number(n)) => Vec3::new(*n, *n, *n),
                Some(value) => value.as_vec3("size")?,
                None => Vec3::new(1.0, 1.0, 1.0),
            };
            let center = params.boolean("center")?.unwrap_or(false);
            expect_no_children(module, &children)?;
            NodeKind::Cube { size, center }
        }
        "cylinder" => {
            let h = params.number("h", Some(0))?.unwrap_or(1.0);
            let r = match params.number("r", None)? {
                Some(r) => Some(r),
                None => params.number("d", None)?.map(|d| d / 2.0),
            };
            let r1 = match params.number("r1", Some(1))? {
                Some(r1) => Some(r1),
                None => params.number("d1", None)?.map(|d| d / 2.0),
            };
            let r2 = match params.number("r2", Some(2))? {
                Some(r2) => Some(r2),
                None => params.number("d2", None)?.map(|d| d / 2.0),
            };
            let r1 = r1.or(r).unwrap_or(1.0);
            let r2 = r2.or(r).unwrap_or(1.0);
            let center = params.boolean("center")?.unwrap_or(false);
            let fn_ = params.number("$fn", None)?.map(|n| n.max(0.0) as u32).unwrap_or(0);
            expect_no_children(module, &children)?;
            NodeKind::Cylinder {
                h,
                r1,
                r2,
                fn_,
                center,
            }
        }
        "polygon" => {
            let points = match params.get("points", 0) {
                Some(Value::Vector(items)) => items
                    .iter()
                    .map(|item| item.as_vec2("points"))
                    .collect::<Result<Vec<_>>>()?,
                Some(_) => bail!("`points` must be a list of [x, y] pairs"),
                None => Vec::new(),
            };
            expect_no_children(module, &children)?;
            NodeKind::Polygon(points)
        }
        "linear_extrude" => NodeKind::LinearExtrude {
            height: params
                .number("height", Some(0))?
                .unwrap_or(DEFAULT_EXTRUDE_HEIGHT),
            center: params.boolean("center")?.unwrap_or(false),
            children,
        },
        "translate" => NodeKind::Transform {
            op: TransformOp::Translate(params.vec3("v", 0)?.unwrap_or_else(Vec3::zeros)),
            children,
        },
        "rotate" => NodeKind::Transform {
            op: rotation(params)?,
            children,
        },
        "mirror" => NodeKind::Transform {
            op: TransformOp::Mirror(params.vec3("v", 0)?.unwrap_or_else(|| Vec3::new(1.0, 0.0, 0.0))),
            children,
        },
        "color" => NodeKind::Color {
            rgba: color(params)?,
            children,
        },
        "union" => NodeKind::Union(children),
        "difference" => NodeKind::Difference(children),
        "intersection" => NodeKind::Intersection(children),
        "hull" => NodeKind::Hull(children),
        other => bail!("Unsupported module `{}`", other),
    };
    Ok(kind)
}

/// `rotate([x, y, z])`, `rotate(a, [axis])`, or `rotate(a)` about Z
fn rotation(params: &Params) -> Result<TransformOp> {
    let axis = params.vec3("v", 1)?;
    match (params.get("a", 0), axis) {
        (Some(Value::Number(angle)), Some(axis)) => Ok(TransformOp::RotateAbout {
            angle: *angle,
            axis,
        }),
        (Some(Value::Number(angle)), None) => Ok(TransformOp::Rotate(Vec3::new(0.0, 0.0, *angle))),
        (Some(angles), _) => Ok(TransformOp::Rotate(angles.as_vec3("a")?)),
        (None, _) => Ok(TransformOp::Rotate(Vec3::zeros())),
    }
}

fn color(params: &Params) -> Result<Rgba> {
    let channels = match params.get("c", 0) {
        Some(Value::Vector(items)) => items
            .iter()
            .map(|item| item.as_number("color channel"))
            .collect::<Result<Vec<_>>>()?,
        Some(_) => bail!("Only [r, g, b] and [r, g, b, a] colors are supported"),
        None => vec![1.0, 1.0, 1.0],
    };

    let alpha = params.number("alpha", None)?;
    match channels.as_slice() {
        [r, g, b] => Ok([*r, *g, *b, alpha.unwrap_or(1.0)]),
        [r, g, b, a] => Ok([*r, *g, *b, alpha.unwrap_or(*a)]),
        other => bail!("Color needs 3 or 4 channels, got {}", other.len()),
    }
}

fn expect_no_children(module: &str, children: &[Node]) -> Result<()> {
    if children.is_empty() {
        Ok(())
    } else {
        bail!("`{}` does not take children", module)
    }
}

// Parameter parsing helpers
#[derive(Debug, Default)]
struct Params {
    named: HashMap<String, Value>,
    positional: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Number(f64),
    Vector(Vec<Value>),
    Boolean(bool),
}

impl Value {
    fn as_number(&self, what: &str) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => bail!("`{}` must be a number, got {:?}", what, other),
        }
    }

    fn numbers(&self, what: &str) -> Result<Vec<f64>> {
        match self {
            Value::Vector(items) => items.iter().map(|item| item.as_number(what)).collect(),
            other => bail!("`{}` must be a vector, got {:?}", what, other),
        }
    }

    /// Two-element vectors get `z = 0`, as OpenSCAD does
    fn as_vec3(&self, what: &str) -> Result<Vec3> {
        match self.numbers(what)?.as_slice() {
            [x, y] => Ok(Vec3::new(*x, *y, 0.0)),
            [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
            other => bail!("`{}` needs 2 or 3 components, got {}", what, other.len()),
        }
    }

    fn as_vec2(&self, what: &str) -> Result<Vec2> {
        match self.numbers(what)?.as_slice() {
            [x, y] => Ok(Vec2::new(*x, *y)),
            other => bail!("`{}` needs 2 components, got {}", what, other.len()),
        }
    }
}

impl Params {
    /// Named argument, falling back to a positional one
    fn get(&self, name: &str, position: usize) -> Option<&Value> {
        self.named
            .get(name)
            .or_else(|| self.positional.get(position))
    }

    fn number(&self, name: &str, position: Option<usize>) -> Result<Option<f64>> {
        let value = match position {
            Some(position) => self.get(name, position),
            None => self.named.get(name),
        };
        value.map(|v| v.as_number(name)).transpose()
    }

    fn vec3(&self, name: &str, position: usize) -> Result<Option<Vec3>> {
        self.get(name, position).map(|v| v.as_vec3(name)).transpose()
    }

    fn boolean(&self, name: &str) -> Result<Option<bool>> {
        match self.named.get(name) {
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => bail!("`{}` must be true or false, got {:?}", name, other),
            None => Ok(None),
        }
    }
}

fn parse_args(pair: Pair<Rule>) -> Result<Params> {
    let mut params = Params::default();

    for arg in pair.into_inner() {
        let mut arg_inner = arg.into_inner();
        let first = next_pair(&mut arg_inner, "argument")?;

        if let Rule::name = first.as_rule() {
            let value = parse_expr(next_pair(&mut arg_inner, "argument value")?)?;
            params.named.insert(first.as_str().to_string(), value);
        } else {
            params.positional.push(parse_expr(first)?);
        }
    }

    Ok(params)
}

fn parse_expr(pair: Pair<Rule>) -> Result<Value> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| anyhow!("Empty expression"))?;

    match inner.as_rule() {
        Rule::number => {
            let text = inner.as_str();
            let n: f64 = text
                .parse()
                .with_context(|| format!("Invalid number: {}", text))?;
            Ok(Value::Number(n))
        }
        Rule::vector => Ok(Value::Vector(
            inner.into_inner().map(parse_expr).collect::<Result<_>>()?,
        )),
        Rule::boolean => Ok(Value::Boolean(inner.as_str() == "true")),
        other => bail!("Unexpected expression: {:?}", other),
    }
}
