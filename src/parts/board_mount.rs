// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Brackets for mounting a microcontroller board
//!
//! The board lies with its connector edge at `y = 0` and extends toward -Y. Every shape is
//! parameterized by `clearance`, the gap between the mounting surface and the underside
//! of the board.

use crate::ast::{difference_of, hull_of, union_of, Node, Vec3};
use crate::error::{ensure_non_negative, ensure_positive, GeometryError, Result};
use crate::geometry::{checked_cube, cylinder_outer, optional, DEFAULT_SEGMENTS};

/// Outer radius of an M2 mounting post
pub const M2_POST_RADIUS: f64 = 6.0 / 2.0;
pub const M2_SHAFT_RADIUS: f64 = 2.0 / 2.0;

/// Slack between the board edge and the back posts
const FUDGE: f64 = 0.2;

/// Side of the square front positioning posts
const FRONT_POST_SIZE: f64 = 4.0;
/// How far the front posts rise above the top of the board
const FRONT_POST_OVERHANG: f64 = 3.0;

// USB-C plug approximation
const PLUG_OFFSET: f64 = 2.0;
const PLUG_LENGTH: f64 = 20.0;
const RECEPTACLE_RADIUS: f64 = 2.5 / 2.0;
const RECEPTACLE_DEPTH: f64 = 6.02;
const PLUG_BODY_RADIUS: f64 = 8.5 / 2.0;
const CONNECTOR_HALF_SPAN: f64 = 4.0 - 1.25;
const CONNECTOR_DROP: f64 = 1.25;

/// M2 mounting post: a cylinder with a concentric shaft bore
pub fn mount_post_m2(height: f64) -> Result<Node> {
    Ok(difference_of(
        cylinder_outer(M2_POST_RADIUS, height, DEFAULT_SEGMENTS, false)?,
        [cylinder_outer(M2_SHAFT_RADIUS, height + 0.1, DEFAULT_SEGMENTS, false)?.down(0.05)],
    ))
}

/// A board and the posts that hold it
#[derive(Debug, Clone, PartialEq)]
pub struct BoardMount {
    pub board_width: f64,
    pub board_length: f64,
    pub board_thickness: f64,
    pub has_connector: bool,
    /// Gap between the two front positioning posts
    pub front_post_separation: f64,
    /// Gap between the two back posts; `None` means a single centered post
    pub back_post_separation: Option<f64>,
}

impl BoardMount {
    /// Validated mount description.
    ///
    /// Separations are gaps between post bodies, so a negative value would make the posts
    /// overlap and is rejected.
    pub fn new(
        board_width: f64,
        board_length: f64,
        board_thickness: f64,
        has_connector: bool,
        front_post_separation: f64,
        back_post_separation: Option<f64>,
    ) -> Result<Self> {
        let mount = Self {
            board_width,
            board_length,
            board_thickness,
            has_connector,
            front_post_separation,
            back_post_separation,
        };
        mount.validate()?;
        Ok(mount)
    }

    /// Check the board dimensions and post separations
    pub fn validate(&self) -> Result<()> {
        ensure_positive("board width", self.board_width)?;
        ensure_positive("board length", self.board_length)?;
        ensure_positive("board thickness", self.board_thickness)?;
        check_separation(self.front_post_separation)?;
        if let Some(separation) = self.back_post_separation {
            check_separation(separation)?;
        }
        Ok(())
    }

    /// SparkFun Pro Micro
    pub fn pro_micro() -> Self {
        Self {
            board_width: 18.3,
            board_length: 33.1,
            board_thickness: 1.7,
            has_connector: true,
            front_post_separation: 10.0,
            back_post_separation: None,
        }
    }

    /// WeAct STM32 "Black Pill"
    pub fn stm32_blackpill() -> Self {
        Self {
            board_width: 20.66,
            board_length: 53.0,
            board_thickness: 1.64,
            has_connector: true,
            front_post_separation: 10.0,
            back_post_separation: Some(11.0),
        }
    }

    /// The bare board outline
    pub fn pcb_only(&self, clearance: f64) -> Result<Node> {
        self.validate()?;
        ensure_non_negative("clearance", clearance)?;
        Ok(checked_cube(
            Vec3::new(self.board_width, self.board_length, self.board_thickness),
            true,
        )?
        .back(self.board_length / 2.0)
        .up(clearance + self.board_thickness / 2.0))
    }

    /// Room for a USB-C plug in front of the board, or nothing without a connector
    pub fn connector(&self, clearance: f64) -> Result<Node> {
        let lofted = |radius: f64, length: f64| -> Result<Node> {
            let post = cylinder_outer(radius, length, DEFAULT_SEGMENTS, false)?;
            Ok(hull_of([
                post.clone().left(CONNECTOR_HALF_SPAN),
                post.right(CONNECTOR_HALF_SPAN),
            ])
            .rotate(Vec3::new(90.0, 0.0, 0.0)))
        };

        let receptacle = lofted(RECEPTACLE_RADIUS, RECEPTACLE_DEPTH)?.forward(PLUG_OFFSET + 0.01);
        let plug = lofted(PLUG_BODY_RADIUS, PLUG_LENGTH)?.forward(PLUG_OFFSET + PLUG_LENGTH);

        Ok(optional(self.has_connector)(
            union_of([receptacle, plug]).up(clearance - CONNECTOR_DROP),
        ))
    }

    /// Board outline plus connector clearance
    pub fn board_profile(&self, clearance: f64) -> Result<Node> {
        Ok(union_of([self.pcb_only(clearance)?, self.connector(clearance)?]))
    }

    /// One centered post, or two symmetric posts, behind the far edge of the board
    pub fn back_mounting_posts(&self, clearance: f64) -> Result<Node> {
        self.validate()?;
        ensure_positive("clearance", clearance)?;
        let post = mount_post_m2(clearance)?;

        let posts = match self.back_post_separation {
            None => post.labeled("back_mounting_post"),
            Some(separation) => {
                let shift = M2_POST_RADIUS + separation / 2.0;
                union_of([
                    post.clone().left(shift).labeled("back_mounting_post"),
                    post.right(shift).labeled("back_mounting_post"),
                ])
            }
        };
        tracing::debug!(separation = ?self.back_post_separation, "placed back mounting posts");

        Ok(posts.back(self.board_length + M2_SHAFT_RADIUS + FUDGE))
    }

    /// Square positioning posts at the front corners, shaped around the board profile
    pub fn front_mounting_posts(&self, clearance: f64) -> Result<Node> {
        self.validate()?;
        let height = clearance + self.board_thickness + FRONT_POST_OVERHANG;
        let post = checked_cube(Vec3::new(FRONT_POST_SIZE, FRONT_POST_SIZE, height), true)?
            .up(height / 2.0)
            .forward(1.0);
        let shift = FRONT_POST_SIZE / 2.0 + self.front_post_separation / 2.0;

        Ok(difference_of(
            union_of([
                post.clone().left(shift).labeled("front_mounting_post"),
                post.right(shift).labeled("front_mounting_post"),
            ]),
            [self.board_profile(clearance)?],
        ))
    }

    pub fn mounting_posts(&self, clearance: f64) -> Result<Node> {
        Ok(union_of([
            self.back_mounting_posts(clearance)?,
            self.front_mounting_posts(clearance)?,
        ]))
    }

    /// Printable bracket: all posts minus the board profile
    pub fn render(&self, clearance: f64) -> Result<Node> {
        Ok(difference_of(
            self.mounting_posts(clearance)?,
            [self.board_profile(clearance)?],
        ))
    }
}

fn check_separation(separation: f64) -> Result<()> {
    if separation.is_finite() && separation >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::OverlappingPosts {
            separation,
            minimum: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Evaluator;
    use crate::geometry::nothing;
    use approx::assert_relative_eq;

    #[test]
    fn test_pcb_outline_position() {
        let mount = BoardMount::pro_micro();
        let bounds = Evaluator::new().bounds(&mount.pcb_only(5.0).unwrap()).unwrap();
        assert_relative_eq!(bounds.max.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.min.y, -33.1, epsilon = 1e-12);
        assert_relative_eq!(bounds.min.z, 5.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.z, 6.7, epsilon = 1e-12);
    }

    #[test]
    fn test_connector_absent() {
        let mount = BoardMount::new(18.3, 33.1, 1.7, false, 10.0, None).unwrap();
        assert_eq!(mount.connector(5.0).unwrap(), nothing());
    }

    #[test]
    fn test_connector_in_front_of_board() {
        let bounds = Evaluator::new()
            .bounds(&BoardMount::pro_micro().connector(5.0).unwrap())
            .unwrap();
        // the receptacle reaches back into the board, the plug body sticks out front
        assert_relative_eq!(bounds.min.y, PLUG_OFFSET + 0.01 - RECEPTACLE_DEPTH, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.y, PLUG_OFFSET + PLUG_LENGTH, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_separation_rejected() {
        assert!(matches!(
            BoardMount::new(20.0, 50.0, 1.6, true, 10.0, Some(-7.0)),
            Err(GeometryError::OverlappingPosts { .. })
        ));
        assert!(BoardMount::new(20.0, 50.0, 1.6, true, -1.0, None).is_err());
        assert!(BoardMount::new(0.0, 50.0, 1.6, true, 10.0, None).is_err());
    }

    #[test]
    fn test_edited_mount_revalidated() {
        let mount = BoardMount {
            back_post_separation: Some(-20.0),
            ..BoardMount::stm32_blackpill()
        };
        assert!(matches!(
            mount.render(5.0),
            Err(GeometryError::OverlappingPosts { .. })
        ));
        assert!(mount.back_mounting_posts(5.0).is_err());

        let mount = BoardMount {
            front_post_separation: -1.0,
            ..BoardMount::pro_micro()
        };
        assert!(mount.front_mounting_posts(5.0).is_err());

        let mount = BoardMount {
            board_thickness: 0.0,
            ..BoardMount::pro_micro()
        };
        assert!(mount.pcb_only(5.0).is_err());
    }

    #[test]
    fn test_front_posts_symmetric() {
        let posts = BoardMount::pro_micro().front_mounting_posts(5.0).unwrap();
        let evaluator = Evaluator::new();
        let centers: Vec<f64> = posts
            .find_labeled("front_mounting_post")
            .into_iter()
            .map(|post| evaluator.bounds(post).unwrap().center().x)
            .collect();
        assert_eq!(centers.len(), 2);
        assert_relative_eq!(centers[0], -7.0);
        assert_relative_eq!(centers[1], 7.0);
    }
}
