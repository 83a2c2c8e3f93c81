// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Named parts that can be rendered from the command line

use crate::assembly::{board_mount_preview, grid_tester, keycap_row, single_tester, switch_preview, Margins};
use crate::ast::Node;
use crate::error::Result;
use crate::keyswitch::{HoleDef, Keyswitch, PlateOptions};
use crate::parts::{pcb_hole_positions, single_key_board, BoardMount, KeySize};
use std::fmt;
use std::str::FromStr;

/// Distance between a board mount's base and the underside of the board
const BOARD_CLEARANCE: f64 = 5.0;
/// Pilot hole radius for screwing a single-key PCB to a plate
const PCB_SCREW_RADIUS: f64 = 0.5;

/// A renderable part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Plate,
    PlateWithBackplate,
    Backplate,
    BackplateClearance,
    ScrewPlate,
    PcbPlate,
    SwitchSilhouette,
    SwitchPreview,
    SingleKeyPcb,
    Keycaps,
    ProMicroMount,
    BlackpillMount,
    BlackpillPreview,
    SingleTester,
    GridTester,
}

impl Part {
    pub const ALL: [Part; 15] = [
        Part::Plate,
        Part::PlateWithBackplate,
        Part::Backplate,
        Part::BackplateClearance,
        Part::ScrewPlate,
        Part::PcbPlate,
        Part::SwitchSilhouette,
        Part::SwitchPreview,
        Part::SingleKeyPcb,
        Part::Keycaps,
        Part::ProMicroMount,
        Part::BlackpillMount,
        Part::BlackpillPreview,
        Part::SingleTester,
        Part::GridTester,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Part::Plate => "plate",
            Part::PlateWithBackplate => "plate-with-backplate",
            Part::Backplate => "backplate",
            Part::BackplateClearance => "backplate-clearance",
            Part::ScrewPlate => "screw-plate",
            Part::PcbPlate => "pcb-plate",
            Part::SwitchSilhouette => "switch-silhouette",
            Part::SwitchPreview => "switch-preview",
            Part::SingleKeyPcb => "single-key-pcb",
            Part::Keycaps => "keycaps",
            Part::ProMicroMount => "pro-micro-mount",
            Part::BlackpillMount => "blackpill-mount",
            Part::BlackpillPreview => "blackpill-preview",
            Part::SingleTester => "single-tester",
            Part::GridTester => "grid-tester",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Part::Plate => "Plate segment for one switch",
            Part::PlateWithBackplate => "Full-depth plate joined to a hot-swap backplate",
            Part::Backplate => "Backplate on its own",
            Part::BackplateClearance => "Room kept clear behind the backplate",
            Part::ScrewPlate => "Plate with two diagonal screw holes",
            Part::PcbPlate => "Plate with through-bores for a single-key PCB",
            Part::SwitchSilhouette => "Switch body above the plate",
            Part::SwitchPreview => "Plate, switch body and 1u keycap",
            Part::SingleKeyPcb => "Single-key hot-swap PCB",
            Part::Keycaps => "SA keycaps in 1u, 1.5u and 2u",
            Part::ProMicroMount => "Bracket for a Pro Micro",
            Part::BlackpillMount => "Bracket for an STM32 Black Pill",
            Part::BlackpillPreview => "Black Pill bracket, with and without the board",
            Part::SingleTester => "One-switch tester",
            Part::GridTester => "2x3 switch tester",
        }
    }

    /// Whether the part depends on the switch family
    pub fn uses_switch(&self) -> bool {
        !matches!(
            self,
            Part::Keycaps | Part::ProMicroMount | Part::BlackpillMount | Part::BlackpillPreview
        )
    }

    pub fn build(&self, switch: &Keyswitch) -> Result<Node> {
        let node = match self {
            Part::Plate => switch.plate(PlateOptions::default())?,
            Part::PlateWithBackplate => switch.plate_with_backplate()?,
            Part::Backplate => switch.backplate()?,
            Part::BackplateClearance => switch.backplate_clearance()?,
            Part::ScrewPlate => switch
                .with_screws([HoleDef::new(-8.0, -8.0, 0.5), HoleDef::new(8.0, 8.0, 0.5)])?
                .plate(PlateOptions::default())?,
            Part::PcbPlate => {
                switch.plate_with_board_mount(&pcb_hole_positions(), PCB_SCREW_RADIUS, 0.0, None)?
            }
            Part::SwitchSilhouette => switch.switch_silhouette(),
            Part::SwitchPreview => switch_preview(switch, KeySize::One)?,
            Part::SingleKeyPcb => single_key_board(switch, false)?,
            Part::Keycaps => keycap_row(),
            Part::ProMicroMount => BoardMount::pro_micro().render(BOARD_CLEARANCE)?,
            Part::BlackpillMount => BoardMount::stm32_blackpill().render(BOARD_CLEARANCE)?,
            Part::BlackpillPreview => {
                board_mount_preview(&BoardMount::stm32_blackpill(), BOARD_CLEARANCE)?
            }
            Part::SingleTester => single_tester(switch)?,
            Part::GridTester => grid_tester(switch, 2, 3, Margins::default())?,
        };
        tracing::debug!(part = self.name(), family = %switch.family, "built part");
        Ok(node)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Part {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Part::ALL
            .into_iter()
            .find(|part| part.name() == wanted)
            .ok_or_else(|| format!("unknown part '{}' (see `spkb list`)", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyswitch::SwitchFamily;

    #[test]
    fn test_names_round_trip() {
        for part in Part::ALL {
            assert_eq!(part.name().parse::<Part>(), Ok(part));
        }
        assert_eq!("grid_tester".parse::<Part>(), Ok(Part::GridTester));
        assert!("sphere".parse::<Part>().is_err());
    }

    #[test]
    fn test_every_part_builds() {
        for family in SwitchFamily::ALL {
            let switch = Keyswitch::new(family);
            for part in Part::ALL {
                let node = part.build(&switch).unwrap();
                assert!(node.node_count() > 0, "{} is empty", part);
            }
        }
    }

    #[test]
    fn test_grid_tester_part_has_six_cells() {
        let node = Part::GridTester.build(&Keyswitch::mx()).unwrap();
        assert_eq!(node.count_labeled("spaced_switch_plate"), 6);
    }
}
