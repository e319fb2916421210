//! Multi-target visit-order optimization.
//!
//! Given a start state and one viewing state per obstacle, computes every
//! pairwise leg cost with the search engine and solves the minimum-cost
//! Hamiltonian path (start fixed, every viewpoint exactly once) with
//! subset dynamic programming. The DP table is a flat array indexed by
//! `(subset bitmask, last viewpoint)`.
//!
//! Complexity is O(2^n · n²) time, O(2^n · n) space. This is a hard
//! scaling ceiling: the planner enforces `max_waypoints` (default 15)
//! before attempting the solve.

use log::{debug, trace};

use crate::arena::Arena;
use crate::config::{CostSettings, SearchSettings};
use crate::core::RobotState;
use crate::error::{PlanError, Result};
use crate::motion::TurnGeometry;
use crate::search::{Path, SearchOutcome, SearchStrategy};

/// Sentinel for an impossible leg in the cost matrix.
const INF: u32 = u32::MAX;

/// Optimized visiting order with the concatenated path.
#[derive(Clone, Debug)]
pub struct RouteResult {
    /// Indices into the input viewpoint slice, in visit order.
    pub order: Vec<usize>,
    /// Concatenated path start → v₁ → … → vₙ, junctions deduplicated.
    pub path: Path,
    /// Total cost; equals the sum of the selected matrix entries.
    pub total_cost: u32,
}

/// Compute the cheapest order in which to visit every viewpoint.
///
/// A leg with no path gets an infinite matrix cost, which forbids orders
/// using it without aborting the whole solve; the request only fails when
/// no complete order exists. A leg search that runs out of its expansion
/// budget fails fast with `CapacityExceeded`.
pub fn optimize(
    arena: &Arena,
    start: RobotState,
    viewpoints: &[RobotState],
    strategy: SearchStrategy,
    geometry: TurnGeometry,
    costs: &CostSettings,
    search: &SearchSettings,
) -> Result<RouteResult> {
    let n = viewpoints.len();
    if n > search.max_waypoints {
        return Err(PlanError::CapacityExceeded {
            what: "viewpoint count",
            value: n,
            limit: search.max_waypoints,
        });
    }
    if n == 0 {
        return Ok(RouteResult {
            order: Vec::new(),
            path: Path::single(start),
            total_cost: 0,
        });
    }

    // nodes[0] is the start; nodes[1..] are the viewpoints.
    let m = n + 1;
    let mut nodes = Vec::with_capacity(m);
    nodes.push(start);
    nodes.extend_from_slice(viewpoints);

    // Pairwise legs. Column 0 (returning to start) is never needed.
    let mut leg_cost = vec![INF; m * m];
    let mut legs: Vec<Option<Path>> = vec![None; m * m];
    for i in 0..m {
        for j in 1..m {
            if i == j {
                continue;
            }
            match strategy.find_path(
                arena,
                nodes[i],
                nodes[j],
                geometry,
                costs,
                search.max_nodes,
            ) {
                SearchOutcome::Found(path) => {
                    leg_cost[i * m + j] = path.cost();
                    legs[i * m + j] = Some(path);
                }
                SearchOutcome::NoPath => {
                    debug!("[Route] leg {} -> {} has no path", nodes[i], nodes[j]);
                }
                SearchOutcome::BudgetExhausted => {
                    return Err(PlanError::CapacityExceeded {
                        what: "search node expansions",
                        value: search.max_nodes + 1,
                        limit: search.max_nodes,
                    });
                }
            }
        }
    }

    // dp[mask * n + j]: cheapest way to visit `mask` ending at viewpoint j.
    let full = (1usize << n) - 1;
    let mut dp = vec![INF; (full + 1) * n];
    let mut prev = vec![usize::MAX; (full + 1) * n];

    for j in 0..n {
        dp[(1 << j) * n + j] = leg_cost[j + 1];
    }

    for mask in 1..=full {
        for j in 0..n {
            let here = dp[mask * n + j];
            if here == INF || mask & (1 << j) == 0 {
                continue;
            }
            for k in 0..n {
                if mask & (1 << k) != 0 {
                    continue;
                }
                let edge = leg_cost[(j + 1) * m + (k + 1)];
                if edge == INF {
                    continue;
                }
                let next = mask | (1 << k);
                let candidate = here + edge;
                if candidate < dp[next * n + k] {
                    dp[next * n + k] = candidate;
                    prev[next * n + k] = j;
                }
            }
        }
    }

    let mut best: Option<(u32, usize)> = None;
    for j in 0..n {
        let cost = dp[full * n + j];
        if cost < best.map_or(INF, |(c, _)| c) {
            best = Some((cost, j));
        }
    }

    let Some((total_cost, mut last)) = best else {
        // No complete order exists. Name an impossible leg for context.
        let (from, to) = first_impossible_leg(&leg_cost, &nodes, m);
        debug!("[Route] infeasible: no order visits every viewpoint");
        return Err(PlanError::NoPathFound { from, to });
    };

    // Reconstruct the order by walking predecessor links backwards.
    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    while last != usize::MAX {
        order.push(last);
        let p = prev[mask * n + last];
        mask &= !(1 << last);
        last = p;
    }
    order.reverse();
    debug_assert_eq!(order.len(), n);

    // Concatenate the selected legs, sharing junction states.
    let mut path = legs[order[0] + 1]
        .clone()
        .expect("selected leg must exist");
    for w in order.windows(2) {
        let leg = legs[(w[0] + 1) * m + (w[1] + 1)]
            .as_ref()
            .expect("selected leg must exist");
        path.extend(leg);
    }
    debug_assert_eq!(path.cost(), total_cost);

    trace!(
        "[Route] order={:?} total_cost={} states={}",
        order,
        total_cost,
        path.states().len()
    );

    Ok(RouteResult {
        order,
        path,
        total_cost,
    })
}

fn first_impossible_leg(
    leg_cost: &[u32],
    nodes: &[RobotState],
    m: usize,
) -> (RobotState, RobotState) {
    for i in 0..m {
        for j in 1..m {
            if i != j && leg_cost[i * m + j] == INF {
                return (nodes[i], nodes[j]);
            }
        }
    }
    (nodes[0], nodes[m - 1])
}
