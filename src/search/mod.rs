//! Point-to-point path search.
//!
//! Two interchangeable strategies behind one contract:
//!
//! - [`SearchStrategy::Heuristic`]: best-first search with an admissible
//!   distance-plus-turn-penalty estimate; minimizes weighted move cost.
//! - [`SearchStrategy::Exhaustive`]: level-order search minimizing move
//!   count first and cost second; useful when a conservative worst-case
//!   estimate is wanted instead of an optimized one.
//!
//! Both strategies keep discovered states in a dense node arena with
//! integer parent links (no reference cycles, no per-node allocation) and
//! deduplicate states at their minimum known cost. "No path" is an
//! expected outcome, not an error.

pub mod astar;
pub mod level;

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::config::CostSettings;
use crate::core::RobotState;
use crate::motion::{Move, TurnGeometry};

/// Which search strategy to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Informed best-first search minimizing weighted cost.
    #[default]
    Heuristic,
    /// Uninformed level-order search minimizing move count, cost second.
    Exhaustive,
}

impl SearchStrategy {
    /// Find a minimum-cost path from `start` to `goal`.
    pub fn find_path(
        self,
        arena: &Arena,
        start: RobotState,
        goal: RobotState,
        geometry: TurnGeometry,
        costs: &CostSettings,
        max_nodes: usize,
    ) -> SearchOutcome {
        match self {
            SearchStrategy::Heuristic => {
                astar::find_path(arena, start, goal, geometry, costs, max_nodes)
            }
            SearchStrategy::Exhaustive => {
                level::find_path(arena, start, goal, geometry, costs, max_nodes)
            }
        }
    }
}

/// Result of one point-to-point search.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// A minimum-cost path was found.
    Found(Path),
    /// Start and goal are disconnected under the current occupancy.
    NoPath,
    /// The node-expansion budget ran out before the search concluded.
    BudgetExhausted,
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// An immutable state path.
///
/// Consecutive states are connected by exactly one move; `moves` is one
/// element shorter than `states`. The cost is the sum of the move costs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    states: Vec<RobotState>,
    moves: Vec<Move>,
    cost: u32,
}

impl Path {
    /// A path of just one state, with zero cost.
    pub fn single(state: RobotState) -> Self {
        Self {
            states: vec![state],
            moves: Vec::new(),
            cost: 0,
        }
    }

    pub fn states(&self) -> &[RobotState] {
        &self.states
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn start(&self) -> RobotState {
        self.states[0]
    }

    pub fn end(&self) -> RobotState {
        *self.states.last().expect("path is never empty")
    }

    /// Append another path whose first state equals this path's last.
    /// The shared junction state is not duplicated.
    pub(crate) fn extend(&mut self, other: &Path) {
        debug_assert_eq!(self.end(), other.start());
        self.states.extend_from_slice(&other.states[1..]);
        self.moves.extend_from_slice(&other.moves);
        self.cost += other.cost;
    }
}

/// A discovered state in the search arena.
///
/// Parent links are indices into the arena, so reconstruction walks a flat
/// array instead of chasing pointers.
pub(crate) struct Node {
    pub state: RobotState,
    pub parent: Option<usize>,
    pub mv: Option<Move>,
    pub cost: u32,
    pub moves: u32,
}

/// Walk parent links from `goal_index` back to the root and build the path.
pub(crate) fn reconstruct(nodes: &[Node], goal_index: usize) -> Path {
    let mut states = Vec::new();
    let mut moves = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(i) = cursor {
        states.push(nodes[i].state);
        if let Some(mv) = nodes[i].mv {
            moves.push(mv);
        }
        cursor = nodes[i].parent;
    }
    states.reverse();
    moves.reverse();
    Path {
        states,
        moves,
        cost: nodes[goal_index].cost,
    }
}
