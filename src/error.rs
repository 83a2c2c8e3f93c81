// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Errors raised while building geometry

use thiserror::Error;

/// Result alias for the geometry builders
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Structurally invalid input to a builder.
///
/// Builders either return a complete tree or fail with one of these; nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("circular primitives need at least 3 segments, got {0}")]
    TooFewSegments(u32),

    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveDimension { name: &'static str, value: f64 },

    #[error("invalid keyswitch descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("mounting posts would overlap: separation {separation} is below {minimum}")]
    OverlappingPosts { separation: f64, minimum: f64 },

    #[error("unrecognized key size: {0} units")]
    UnknownKeySize(f64),

    #[error("a tester grid needs at least one unit on each axis, got {length_units}x{width_units}")]
    EmptyGrid { length_units: u32, width_units: u32 },
}

/// Reject a dimension that is zero, negative, NaN or infinite.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositiveDimension { name, value })
    }
}

/// Reject a value that is negative, NaN or infinite. Zero is allowed.
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositiveDimension { name, value })
    }
}
