// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Built-in switch families
//!
//! The families differ only in constant values, so they are a closed enum that hands out
//! data rather than a trait with per-family behavior.

use super::{Keyswitch, NotchProfile, Silhouette};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Switch footprint family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchFamily {
    /// Cherry MX and compatibles, with Kailh MX hot-swap sockets
    #[default]
    Mx,
    /// Kailh Choc low profile, with Kailh Choc hot-swap sockets
    Choc,
}

/// What a backplate hole is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoleRole {
    CenterPost,
    SidePost,
    /// Locating feature at one corner (Choc only)
    CornerPost,
    Contact,
    Led,
}

/// A hole through the backplate.
///
/// Holes are sized for hot-swap sockets; they stay large enough when soldering directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackplateHole {
    pub role: HoleRole,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Elongation along Y; zero for a round hole
    pub slot_length: f64,
}

const fn hole(role: HoleRole, x: f64, y: f64, radius: f64) -> BackplateHole {
    BackplateHole {
        role,
        x,
        y,
        radius,
        slot_length: 0.0,
    }
}

const LED_RADIUS: f64 = 0.4953;

// Kailh PaleBlueSpeed layout, CPG151101S11-16 socket
const MX_BACKPLATE: &[BackplateHole] = &[
    hole(HoleRole::CenterPost, 0.0, 0.0, 1.9939),
    hole(HoleRole::SidePost, 5.08, 0.0, 0.8509),
    hole(HoleRole::SidePost, -5.08, 0.0, 0.8509),
    hole(HoleRole::Contact, -3.81, 2.54, 1.5),
    hole(HoleRole::Contact, 2.54, 5.08, 1.5),
    hole(HoleRole::Led, 1.27, -5.08, LED_RADIUS),
    hole(HoleRole::Led, -1.27, -5.08, LED_RADIUS),
    hole(HoleRole::Led, 3.81, -5.08, LED_RADIUS),
    hole(HoleRole::Led, -3.81, -5.08, LED_RADIUS),
];

// Kailh Choc Navy layout, CPG135001S30 socket
const CHOC_BACKPLATE: &[BackplateHole] = &[
    hole(HoleRole::CenterPost, 0.0, 0.0, 2.5),
    hole(HoleRole::SidePost, 5.5, 0.0, 0.95),
    hole(HoleRole::SidePost, -5.5, 0.0, 0.95),
    BackplateHole {
        role: HoleRole::CornerPost,
        x: 5.0,
        y: -5.15,
        radius: 0.75,
        slot_length: 0.5,
    },
    hole(HoleRole::Contact, -5.0, 3.8, 1.5),
    hole(HoleRole::Contact, 0.0, 5.9, 1.5),
    hole(HoleRole::Led, 1.27, -4.815, LED_RADIUS),
    hole(HoleRole::Led, -1.27, -4.815, LED_RADIUS),
    hole(HoleRole::Led, 3.81, -4.815, LED_RADIUS),
    hole(HoleRole::Led, -3.81, -4.815, LED_RADIUS),
];

impl SwitchFamily {
    pub const ALL: [SwitchFamily; 2] = [SwitchFamily::Mx, SwitchFamily::Choc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchFamily::Mx => "mx",
            SwitchFamily::Choc => "choc",
        }
    }

    /// Holes drilled through this family's backplate
    pub fn backplate_holes(&self) -> &'static [BackplateHole] {
        match self {
            SwitchFamily::Mx => MX_BACKPLATE,
            SwitchFamily::Choc => CHOC_BACKPLATE,
        }
    }

    fn silhouette(&self) -> Silhouette {
        match self {
            SwitchFamily::Mx => Silhouette {
                midline_width: 13.95,
                midline_length: 15.6,
                topline_width: 10.5,
                topline_length: 10.5,
                height_above_plate: 6.2,
            },
            SwitchFamily::Choc => Silhouette {
                midline_width: 15.0,
                midline_length: 15.0,
                topline_width: 12.5,
                topline_length: 12.5,
                height_above_plate: 3.3,
            },
        }
    }

    /// Full descriptor for this family
    pub fn descriptor(&self) -> Keyswitch {
        Keyswitch {
            family: *self,
            hole_width: 14.0,
            hole_length: 14.0,
            depth: 5.08,
            plate_thickness: 3.0,
            notch: NotchProfile {
                plate_thickness: 1.3,
                width: 5.0,
                width_outer: 6.0,
                depth: 0.5,
                height: 8.0,
                height_outer: 9.0,
            },
            wall_thickness: 1.5,
            backplate_thickness: 1.25,
            backplate_clearance_distance: 3.5,
            silhouette: self.silhouette(),
            screws: None,
        }
    }
}

impl fmt::Display for SwitchFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mx" | "cherry" => Ok(SwitchFamily::Mx),
            "choc" | "kailh-choc" => Ok(SwitchFamily::Choc),
            other => Err(format!("unknown switch family '{}' (expected mx or choc)", other)),
        }
    }
}
