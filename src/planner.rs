//! Planning facade.
//!
//! Ties the pipeline together: validate the request, derive the arena
//! occupancy, project viewpoints, optimize the visiting order, and emit
//! the command script. Each request is self-contained; nothing persists
//! between invocations.

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::arena::{project_viewpoints, Arena, Obstacle};
use crate::commands::{self, CommandScript};
use crate::config::PlannerConfig;
use crate::core::RobotState;
use crate::error::{PlanError, Result};
use crate::motion::TurnGeometry;
use crate::route;
use crate::search::SearchStrategy;

/// One self-contained planning request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Arena width in cells.
    pub width: i32,
    /// Arena height in cells.
    pub height: i32,
    /// Robot start state.
    pub start: RobotState,
    /// Obstacles to visit, in registration order.
    pub obstacles: Vec<Obstacle>,
    /// Turn geometry for the whole request. Defaults to normal.
    #[serde(default)]
    pub geometry: TurnGeometry,
    /// Search strategy for every pairwise leg. Defaults to heuristic.
    #[serde(default)]
    pub strategy: SearchStrategy,
}

/// Successful planning result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Total travel cost in distance units.
    pub total_cost: u32,
    /// Obstacle identifiers in visiting order.
    pub visit_order: Vec<String>,
    /// Every robot state visited, starting with the request start.
    pub states: Vec<RobotState>,
    /// Command script with its command-to-waypoint mapping.
    pub script: CommandScript,
}

/// Plan a full tour over all obstacles.
pub fn plan(request: &PlanRequest, config: &PlannerConfig) -> Result<PlanResponse> {
    validate(request)?;

    let arena = Arena::new(
        request.width,
        request.height,
        &request.obstacles,
        config.clearance,
    );

    let viewpoints = project_viewpoints(&arena, &request.obstacles, config.clearance);
    let unreachable: Vec<String> = viewpoints
        .iter()
        .filter(|vp| !vp.reachable)
        .map(|vp| vp.obstacle.id.clone())
        .collect();
    if !unreachable.is_empty() {
        debug!("[Planner] rejecting request, unreachable: {:?}", unreachable);
        return Err(PlanError::UnreachableViewpoint { ids: unreachable });
    }

    let states: Vec<RobotState> = viewpoints.iter().map(|vp| vp.state).collect();
    let result = route::optimize(
        &arena,
        request.start,
        &states,
        request.strategy,
        request.geometry,
        &config.costs,
        &config.search,
    )?;

    let snap_points: HashMap<RobotState, String> = viewpoints
        .iter()
        .map(|vp| (vp.state, vp.obstacle.id.clone()))
        .collect();
    let script = commands::generate(&result.path, &snap_points, request.geometry);

    let visit_order: Vec<String> = result
        .order
        .iter()
        .map(|&i| request.obstacles[i].id.clone())
        .collect();

    info!(
        "[Planner] planned {} obstacles, cost={}, {} commands",
        request.obstacles.len(),
        result.total_cost,
        script.commands.len()
    );

    Ok(PlanResponse {
        total_cost: result.total_cost,
        visit_order,
        states: result.path.states().to_vec(),
        script,
    })
}

/// Registration-time validation: reject malformed requests before any
/// search runs.
fn validate(request: &PlanRequest) -> Result<()> {
    if request.width <= 0 || request.height <= 0 {
        return Err(PlanError::InvalidConfiguration(format!(
            "arena dimensions must be positive, got {}x{}",
            request.width, request.height
        )));
    }

    let in_bounds = |c: crate::core::GridCell| {
        c.x >= 0 && c.x < request.width && c.y >= 0 && c.y < request.height
    };
    if !in_bounds(request.start.cell) {
        return Err(PlanError::InvalidConfiguration(format!(
            "start {} outside the arena",
            request.start.cell
        )));
    }

    let mut ids = HashSet::new();
    let mut placements = HashSet::new();
    for ob in &request.obstacles {
        if !in_bounds(ob.cell) {
            return Err(PlanError::InvalidConfiguration(format!(
                "obstacle {} at {} outside the arena",
                ob.id, ob.cell
            )));
        }
        if !ids.insert(ob.id.as_str()) {
            return Err(PlanError::InvalidConfiguration(format!(
                "duplicate obstacle identifier {}",
                ob.id
            )));
        }
        if !placements.insert((ob.cell, ob.facing)) {
            return Err(PlanError::InvalidConfiguration(format!(
                "duplicate obstacle placement {} {}",
                ob.cell, ob.facing
            )));
        }
    }
    Ok(())
}
