//! Motion primitives.
//!
//! The robot moves with six primitives: straight forward/backward by one
//! cell, and quarter-circle turns in four quadrant variants (forward-left,
//! forward-right, backward-left, backward-right). A turn changes both the
//! cell and the heading; its displacement depends on the turn geometry.
//!
//! Backward turns are exact inverses of the corresponding forward turns:
//! a forward-right arc followed by a backward-left arc returns the robot
//! to its original state. Command replay relies on this.

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::config::CostSettings;
use crate::core::{GridCell, RobotState};

/// Turn geometry mode, selected once per planning request.
///
/// Normal sweeps 3 cells forward and 1 lateral; wide sweeps 4 forward and
/// 2 lateral. These match the reference deployment's turn factors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnGeometry {
    #[default]
    Normal,
    Wide,
}

impl TurnGeometry {
    /// (forward, lateral) cell sweep of one quarter turn.
    #[inline]
    pub fn sweep(self) -> (i32, i32) {
        match self {
            TurnGeometry::Normal => (3, 1),
            TurnGeometry::Wide => (4, 2),
        }
    }
}

/// A primitive transition between robot states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Forward,
    Backward,
    TurnForwardLeft,
    TurnForwardRight,
    TurnBackwardLeft,
    TurnBackwardRight,
}

impl Move {
    /// All moves in expansion order. The order is part of the search
    /// tie-break contract and must not change between releases.
    pub const ALL: [Move; 6] = [
        Move::Forward,
        Move::Backward,
        Move::TurnForwardLeft,
        Move::TurnForwardRight,
        Move::TurnBackwardLeft,
        Move::TurnBackwardRight,
    ];

    /// Is this a one-cell straight move?
    #[inline]
    pub fn is_straight(self) -> bool {
        matches!(self, Move::Forward | Move::Backward)
    }

    /// State reached by applying this move.
    ///
    /// Pure geometry; the target may be outside the arena. Legality is
    /// checked separately against swept cells.
    pub fn apply(self, state: RobotState, geometry: TurnGeometry) -> RobotState {
        match self {
            Move::Forward => state.step_forward(),
            Move::Backward => state.step_backward(),
            _ => {
                let (a, b) = geometry.sweep();
                let (fx, fy) = state.heading.vector();
                let (rx, ry) = state.heading.turn_right().vector();
                let (dx, dy, heading) = match self {
                    Move::TurnForwardRight => {
                        (a * fx + b * rx, a * fy + b * ry, state.heading.turn_right())
                    }
                    Move::TurnForwardLeft => {
                        (a * fx - b * rx, a * fy - b * ry, state.heading.turn_left())
                    }
                    Move::TurnBackwardRight => (
                        -b * fx - a * rx,
                        -b * fy - a * ry,
                        state.heading.turn_right(),
                    ),
                    Move::TurnBackwardLeft => {
                        (-b * fx + a * rx, -b * fy + a * ry, state.heading.turn_left())
                    }
                    Move::Forward | Move::Backward => unreachable!(),
                };
                RobotState::new(state.cell.offset(dx, dy), heading)
            }
        }
    }

    /// Cost of this move under the given cost settings and geometry.
    #[inline]
    pub fn cost(self, costs: &CostSettings, geometry: TurnGeometry) -> u32 {
        if self.is_straight() {
            costs.straight
        } else {
            match geometry {
                TurnGeometry::Normal => costs.normal_turn,
                TurnGeometry::Wide => costs.wide_turn,
            }
        }
    }

    /// Cells the robot footprint center passes through, start exclusive,
    /// target inclusive.
    ///
    /// Turns are swept as an axis-aligned L: the longitudinal leg first,
    /// then the lateral leg. Every swept cell must be footprint-legal for
    /// the turn to be available.
    pub fn swept_cells(self, state: RobotState, geometry: TurnGeometry) -> Vec<GridCell> {
        let target = self.apply(state, geometry);
        if self.is_straight() {
            return vec![target.cell];
        }

        let (fx, fy) = state.heading.vector();
        let dx = target.cell.x - state.cell.x;
        let dy = target.cell.y - state.cell.y;
        // longitudinal component (signed, along the start heading)
        let along = dx * fx + dy * fy;
        let step = along.signum();

        let mut cells = Vec::with_capacity((dx.abs() + dy.abs()) as usize);
        let mut cursor = state.cell;
        for _ in 0..along.abs() {
            cursor = cursor.offset(step * fx, step * fy);
            cells.push(cursor);
        }
        // lateral leg straight to the target
        let lx = (target.cell.x - cursor.x).signum();
        let ly = (target.cell.y - cursor.y).signum();
        while cursor != target.cell {
            cursor = cursor.offset(lx, ly);
            cells.push(cursor);
        }
        cells
    }
}

/// Legal successor states of `state` under the arena occupancy.
///
/// Returned in `Move::ALL` order so that equal-cost search candidates are
/// expanded deterministically.
pub fn successors(
    state: RobotState,
    arena: &Arena,
    geometry: TurnGeometry,
) -> Vec<(Move, RobotState)> {
    let mut out = Vec::with_capacity(Move::ALL.len());
    for mv in Move::ALL {
        let target = mv.apply(state, geometry);
        if !arena.is_footprint_legal(target.cell) {
            continue;
        }
        if !mv.is_straight()
            && !mv
                .swept_cells(state, geometry)
                .iter()
                .all(|&c| arena.is_footprint_legal(c))
        {
            continue;
        }
        out.push((mv, target));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Obstacle;
    use crate::core::Heading;

    #[test]
    fn test_straight_moves() {
        let s = RobotState::at(5, 5, Heading::East);
        assert_eq!(
            Move::Forward.apply(s, TurnGeometry::Normal),
            RobotState::at(6, 5, Heading::East)
        );
        assert_eq!(
            Move::Backward.apply(s, TurnGeometry::Normal),
            RobotState::at(4, 5, Heading::East)
        );
    }

    #[test]
    fn test_normal_turn_displacements() {
        let s = RobotState::at(5, 5, Heading::North);
        assert_eq!(
            Move::TurnForwardRight.apply(s, TurnGeometry::Normal),
            RobotState::at(6, 8, Heading::East)
        );
        assert_eq!(
            Move::TurnForwardLeft.apply(s, TurnGeometry::Normal),
            RobotState::at(4, 8, Heading::West)
        );
        assert_eq!(
            Move::TurnBackwardRight.apply(s, TurnGeometry::Normal),
            RobotState::at(2, 4, Heading::East)
        );
        assert_eq!(
            Move::TurnBackwardLeft.apply(s, TurnGeometry::Normal),
            RobotState::at(8, 4, Heading::West)
        );
    }

    #[test]
    fn test_wide_turn_is_larger() {
        let s = RobotState::at(5, 5, Heading::North);
        assert_eq!(
            Move::TurnForwardRight.apply(s, TurnGeometry::Wide),
            RobotState::at(7, 9, Heading::East)
        );
    }

    #[test]
    fn test_backward_turns_invert_forward_turns() {
        for geometry in [TurnGeometry::Normal, TurnGeometry::Wide] {
            for h in Heading::ALL {
                let s = RobotState::at(10, 10, h);
                let fr = Move::TurnForwardRight.apply(s, geometry);
                assert_eq!(Move::TurnBackwardLeft.apply(fr, geometry), s);
                let fl = Move::TurnForwardLeft.apply(s, geometry);
                assert_eq!(Move::TurnBackwardRight.apply(fl, geometry), s);
            }
        }
    }

    #[test]
    fn test_swept_cells_cover_the_arc() {
        let s = RobotState::at(5, 5, Heading::North);
        let cells = Move::TurnForwardRight.swept_cells(s, TurnGeometry::Normal);
        assert_eq!(
            cells,
            vec![
                GridCell::new(5, 6),
                GridCell::new(5, 7),
                GridCell::new(5, 8),
                GridCell::new(6, 8),
            ]
        );
    }

    #[test]
    fn test_turn_blocked_by_swept_cell() {
        // obstacle sits on the longitudinal leg of the FR turn from (5,5)N
        let obstacles = vec![Obstacle::new(GridCell::new(5, 7), Heading::South, "1")];
        let arena = Arena::new(20, 20, &obstacles, 2);
        let s = RobotState::at(5, 5, Heading::North);
        let moves: Vec<Move> = successors(s, &arena, TurnGeometry::Normal)
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert!(!moves.contains(&Move::TurnForwardRight));
        assert!(!moves.contains(&Move::Forward));
        assert!(moves.contains(&Move::Backward));
    }

    #[test]
    fn test_successors_in_open_space() {
        let arena = Arena::new(20, 20, &[], 2);
        let s = RobotState::at(10, 10, Heading::North);
        let succ = successors(s, &arena, TurnGeometry::Normal);
        assert_eq!(succ.len(), Move::ALL.len());
        // expansion order is the declared move order
        assert_eq!(succ[0].0, Move::Forward);
        assert_eq!(succ[1].0, Move::Backward);
    }

    #[test]
    fn test_successors_near_wall() {
        let arena = Arena::new(20, 20, &[], 2);
        let s = RobotState::at(1, 1, Heading::North);
        let succ = successors(s, &arena, TurnGeometry::Normal);
        // backward would leave the footprint margin; so would left turns
        assert!(succ.iter().all(|(m, _)| *m != Move::Backward));
        assert!(succ.iter().any(|(m, _)| *m == Move::Forward));
    }
}
