//! Arena occupancy model.
//!
//! The arena is a fixed-size grid populated by oriented obstacles. Occupancy
//! is derived once per planning request from the obstacle set and read-only
//! afterwards; every query on an out-of-range cell simply answers "not free"
//! rather than erroring.

pub mod viewpoint;

pub use viewpoint::{project_viewpoints, ObstacleViewpoint};

use serde::{Deserialize, Serialize};

use crate::core::{GridCell, Heading};

/// An oriented obstacle on the arena.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Cell the obstacle occupies.
    pub cell: GridCell,

    /// Heading the robot must hold while sensing the marked face. The
    /// viewing state sits on the opposite side of the obstacle along this
    /// axis, looking back at it.
    pub facing: Heading,

    /// Opaque identifier, passed through untouched for downstream
    /// correlation with sensing results.
    pub id: String,
}

impl Obstacle {
    pub fn new(cell: GridCell, facing: Heading, id: impl Into<String>) -> Self {
        Self {
            cell,
            facing,
            id: id.into(),
        }
    }
}

/// Read-only occupancy grid for one planning request.
///
/// A cell is occupied when it lies within the Chebyshev clearance margin of
/// any obstacle (distance < clearance). The robot footprint additionally
/// requires one cell of margin from the arena walls.
pub struct Arena {
    width: i32,
    height: i32,
    occupied: Vec<bool>,
}

impl Arena {
    /// Build the arena occupancy from an obstacle set.
    ///
    /// Obstacle cells outside the arena are ignored here; the planner
    /// facade rejects them at registration time.
    pub fn new(width: i32, height: i32, obstacles: &[Obstacle], clearance: i32) -> Self {
        let mut occupied = vec![false; (width * height).max(0) as usize];
        let margin = clearance - 1;

        for ob in obstacles {
            for dy in -margin..=margin {
                for dx in -margin..=margin {
                    let c = ob.cell.offset(dx, dy);
                    if c.x >= 0 && c.x < width && c.y >= 0 && c.y < height {
                        occupied[(c.y * width + c.x) as usize] = true;
                    }
                }
            }
        }

        Self {
            width,
            height,
            occupied,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Is the cell inside the arena bounds?
    #[inline]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Is the cell inside bounds and clear of every obstacle margin?
    #[inline]
    pub fn is_free(&self, cell: GridCell) -> bool {
        self.in_bounds(cell) && !self.occupied[(cell.y * self.width + cell.x) as usize]
    }

    /// Can the robot footprint legally center on this cell?
    ///
    /// The footprint spans the eight neighbors too, so the center must keep
    /// one cell of margin from the walls on top of being free.
    #[inline]
    pub fn is_footprint_legal(&self, cell: GridCell) -> bool {
        cell.x >= 1
            && cell.x < self.width - 1
            && cell.y >= 1
            && cell.y < self.height - 1
            && self.is_free(cell)
    }
}
