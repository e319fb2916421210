//! Robot state: the search-space vertex.

use serde::{Deserialize, Serialize};

use super::{GridCell, Heading};

/// Position plus heading.
///
/// Equality and hashing cover the full tuple: two states on the same cell
/// with different headings are distinct vertices, because reorienting the
/// robot costs real moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RobotState {
    pub cell: GridCell,
    pub heading: Heading,
}

impl RobotState {
    /// Create a state at `cell` facing `heading`.
    #[inline]
    pub fn new(cell: GridCell, heading: Heading) -> Self {
        Self { cell, heading }
    }

    /// Convenience constructor from raw coordinates.
    #[inline]
    pub fn at(x: i32, y: i32, heading: Heading) -> Self {
        Self::new(GridCell::new(x, y), heading)
    }

    /// State one cell forward on the current heading.
    #[inline]
    pub fn step_forward(self) -> Self {
        let (dx, dy) = self.heading.vector();
        Self::new(self.cell.offset(dx, dy), self.heading)
    }

    /// State one cell backward on the current heading.
    #[inline]
    pub fn step_backward(self) -> Self {
        let (dx, dy) = self.heading.vector();
        Self::new(self.cell.offset(-dx, -dy), self.heading)
    }
}

impl std::fmt::Display for RobotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.cell, self.heading)
    }
}
