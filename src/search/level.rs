//! Exhaustive level-order search over robot states.
//!
//! Expands the frontier strictly by move count, with accumulated cost as
//! the secondary ordering key. The result is the path with the fewest
//! moves (cheapest among those), which serves as a conservative worst-case
//! travel estimate rather than a weighted-cost optimum.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::{debug, trace};

use crate::arena::Arena;
use crate::config::CostSettings;
use crate::core::RobotState;
use crate::motion::{successors, TurnGeometry};

use super::{reconstruct, Node, SearchOutcome};

/// Frontier entry ordered by (move count, cost, insertion sequence).
struct Frontier {
    moves: u32,
    cost: u32,
    seq: u64,
    index: usize,
}

impl Eq for Frontier {}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.moves == other.moves && self.cost == other.cost && self.seq == other.seq
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .moves
            .cmp(&self.moves)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the fewest-moves path from `start` to `goal`.
pub fn find_path(
    arena: &Arena,
    start: RobotState,
    goal: RobotState,
    geometry: TurnGeometry,
    costs: &CostSettings,
    max_nodes: usize,
) -> SearchOutcome {
    trace!("[Level] find_path: start={} goal={}", start, goal);

    if !arena.is_footprint_legal(start.cell) || !arena.is_footprint_legal(goal.cell) {
        debug!("[Level] FAILED: start or goal not a legal footprint position");
        return SearchOutcome::NoPath;
    }

    let mut nodes: Vec<Node> = vec![Node {
        state: start,
        parent: None,
        mv: None,
        cost: 0,
        moves: 0,
    }];
    let mut discovered: HashMap<RobotState, usize> = HashMap::new();
    discovered.insert(start, 0);

    let mut open = BinaryHeap::new();
    let mut seq: u64 = 0;
    open.push(Frontier {
        moves: 0,
        cost: 0,
        seq,
        index: 0,
    });

    let mut expanded = 0usize;

    while let Some(current) = open.pop() {
        let current_state = nodes[current.index].state;

        if discovered[&current_state] != current.index {
            continue;
        }

        if current_state == goal {
            let path = reconstruct(&nodes, current.index);
            trace!(
                "[Level] SUCCESS: {} moves, cost={}, expanded={}",
                path.moves().len(),
                path.cost(),
                expanded
            );
            return SearchOutcome::Found(path);
        }

        expanded += 1;
        if expanded > max_nodes {
            debug!("[Level] FAILED: budget exhausted after {} nodes", expanded);
            return SearchOutcome::BudgetExhausted;
        }

        for (mv, next) in successors(current_state, arena, geometry) {
            let moves = nodes[current.index].moves + 1;
            let cost = nodes[current.index].cost + mv.cost(costs, geometry);
            match discovered.get(&next) {
                // keep the incumbent unless the new route is strictly
                // better in (moves, cost) order
                Some(&i)
                    if (nodes[i].moves, nodes[i].cost) <= (moves, cost) =>
                {
                    continue
                }
                _ => {}
            }

            let index = nodes.len();
            nodes.push(Node {
                state: next,
                parent: Some(current.index),
                mv: Some(mv),
                cost,
                moves,
            });
            discovered.insert(next, index);

            seq += 1;
            open.push(Frontier {
                moves,
                cost,
                seq,
                index,
            });
        }
    }

    debug!("[Level] FAILED: no path after expanding {} nodes", expanded);
    SearchOutcome::NoPath
}
