//! Grid cell coordinates.

use serde::{Deserialize, Serialize};

/// Integer coordinate of a single arena cell.
///
/// X grows east, Y grows north. Coordinates are signed so that motion
/// primitives can step outside the arena and be rejected by bounds checks
/// instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    /// Create a cell at (x, y).
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell displaced by (dx, dy).
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (chessboard) distance to another cell.
    ///
    /// This is the collision-margin metric: an obstacle blocks every cell
    /// within a fixed Chebyshev radius of it.
    #[inline]
    pub fn chebyshev(self, other: GridCell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
