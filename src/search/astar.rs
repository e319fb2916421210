//! Heuristic best-first search over robot states.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::{debug, trace};

use crate::arena::Arena;
use crate::config::CostSettings;
use crate::core::RobotState;
use crate::motion::{successors, TurnGeometry};

use super::{reconstruct, Node, SearchOutcome};

/// A frontier entry. Orders by estimated total cost, then by insertion
/// sequence so that equal-estimate candidates pop in discovery order and
/// results stay reproducible.
struct Frontier {
    f_cost: u32,
    seq: u64,
    index: usize,
}

impl Eq for Frontier {}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Admissible estimate of the remaining cost from `from` to `goal`.
///
/// Chebyshev cell distance times the cheapest per-cell rate any move can
/// achieve, plus a fixed penalty when the headings differ. A straight move
/// advances 1 cell for `straight`; a turn advances at most its forward
/// sweep for the turn cost, so the rate is the minimum of the two and the
/// estimate never exceeds the true remaining cost.
fn heuristic(
    from: RobotState,
    goal: RobotState,
    costs: &CostSettings,
    geometry: TurnGeometry,
) -> u32 {
    let (forward, _) = geometry.sweep();
    let forward = forward as u32;
    let turn_cost = match geometry {
        TurnGeometry::Normal => costs.normal_turn,
        TurnGeometry::Wide => costs.wide_turn,
    };
    let rate = costs.straight.min(turn_cost / forward);

    let distance = from.cell.chebyshev(goal.cell) as u32 * rate;
    if from.heading == goal.heading {
        distance
    } else {
        distance + turn_cost.saturating_sub(forward * rate)
    }
}

/// Find a minimum weighted-cost path from `start` to `goal`.
pub fn find_path(
    arena: &Arena,
    start: RobotState,
    goal: RobotState,
    geometry: TurnGeometry,
    costs: &CostSettings,
    max_nodes: usize,
) -> SearchOutcome {
    trace!("[AStar] find_path: start={} goal={}", start, goal);

    if !arena.is_footprint_legal(start.cell) || !arena.is_footprint_legal(goal.cell) {
        debug!("[AStar] FAILED: start or goal not a legal footprint position");
        return SearchOutcome::NoPath;
    }

    let mut nodes: Vec<Node> = vec![Node {
        state: start,
        parent: None,
        mv: None,
        cost: 0,
        moves: 0,
    }];
    // state -> arena index of its best-known node
    let mut discovered: HashMap<RobotState, usize> = HashMap::new();
    discovered.insert(start, 0);

    let mut open = BinaryHeap::new();
    let mut seq: u64 = 0;
    open.push(Frontier {
        f_cost: heuristic(start, goal, costs, geometry),
        seq,
        index: 0,
    });

    let mut expanded = 0usize;

    while let Some(current) = open.pop() {
        let current_state = nodes[current.index].state;
        let current_cost = nodes[current.index].cost;

        // Stale heap entry: the state was re-discovered cheaper later.
        if discovered[&current_state] != current.index {
            continue;
        }

        if current_state == goal {
            let path = reconstruct(&nodes, current.index);
            trace!(
                "[AStar] SUCCESS: {} moves, cost={}, expanded={}",
                path.moves().len(),
                path.cost(),
                expanded
            );
            return SearchOutcome::Found(path);
        }

        expanded += 1;
        if expanded > max_nodes {
            debug!("[AStar] FAILED: budget exhausted after {} nodes", expanded);
            return SearchOutcome::BudgetExhausted;
        }

        for (mv, next) in successors(current_state, arena, geometry) {
            let tentative = current_cost + mv.cost(costs, geometry);
            match discovered.get(&next) {
                Some(&i) if nodes[i].cost <= tentative => continue,
                _ => {}
            }

            let index = nodes.len();
            nodes.push(Node {
                state: next,
                parent: Some(current.index),
                mv: Some(mv),
                cost: tentative,
                moves: nodes[current.index].moves + 1,
            });
            discovered.insert(next, index);

            seq += 1;
            open.push(Frontier {
                f_cost: tentative + heuristic(next, goal, costs, geometry),
                seq,
                index,
            });
        }
    }

    debug!("[AStar] FAILED: no path after expanding {} nodes", expanded);
    SearchOutcome::NoPath
}
