//! End-to-end planning scenarios.
//!
//! Each test drives the full pipeline through the facade: validation,
//! viewpoint projection, visit ordering, and command generation.

use marga_plan::core::{GridCell, Heading, RobotState};
use marga_plan::{
    plan, Command, Obstacle, PlanError, PlanRequest, PlannerConfig, SearchStrategy, TurnGeometry,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn request(obstacles: Vec<Obstacle>) -> PlanRequest {
    PlanRequest {
        width: 20,
        height: 20,
        start: RobotState::at(1, 1, Heading::North),
        obstacles,
        geometry: TurnGeometry::Normal,
        strategy: SearchStrategy::Heuristic,
    }
}

/// A wall of obstacles splitting the arena into west and east halves.
/// Every wall viewpoint sits on the east side and stays reachable.
fn wall_obstacles() -> Vec<Obstacle> {
    (0..6)
        .map(|i| {
            Obstacle::new(
                GridCell::new(10, 2 + i * 3),
                Heading::West,
                format!("wall{i}"),
            )
        })
        .collect()
}

#[test]
fn single_obstacle_tour() {
    init_logs();
    let req = request(vec![Obstacle::new(GridCell::new(5, 5), Heading::North, "1")]);
    let response = plan(&req, &PlannerConfig::default()).unwrap();

    assert!(response.states.len() > 1);
    assert_eq!(response.states[0], req.start);
    assert_eq!(
        *response.states.last().unwrap(),
        RobotState::at(5, 3, Heading::North)
    );
    assert_eq!(response.visit_order, vec!["1".to_string()]);

    // exactly one sensing pair, then the finish token
    let snaps: Vec<usize> = response
        .script
        .commands
        .iter()
        .enumerate()
        .filter_map(|(i, c)| matches!(c, Command::Snap { .. }).then_some(i))
        .collect();
    assert_eq!(snaps.len(), 1);
    assert_eq!(
        response.script.commands[snaps[0] + 1],
        Command::Noop,
        "snap must be followed by a settle tick"
    );
    assert_eq!(*response.script.commands.last().unwrap(), Command::Finish);
    assert!(snaps[0] < response.script.commands.len() - 1);
}

#[test]
fn zero_obstacles_yields_finish_only() {
    init_logs();
    let req = request(Vec::new());
    let response = plan(&req, &PlannerConfig::default()).unwrap();
    assert_eq!(response.total_cost, 0);
    assert_eq!(response.states, vec![req.start]);
    assert_eq!(response.script.commands, vec![Command::Finish]);
}

#[test]
fn planning_is_deterministic() {
    init_logs();
    let req = request(vec![
        Obstacle::new(GridCell::new(5, 9), Heading::East, "a"),
        Obstacle::new(GridCell::new(14, 4), Heading::North, "b"),
        Obstacle::new(GridCell::new(9, 15), Heading::South, "c"),
    ]);
    let first = plan(&req, &PlannerConfig::default()).unwrap();
    let second = plan(&req, &PlannerConfig::default()).unwrap();
    assert_eq!(first.total_cost, second.total_cost);
    assert_eq!(first.visit_order, second.visit_order);
    assert_eq!(first.states, second.states);
    assert_eq!(first.script, second.script);
}

#[test]
fn command_replay_reproduces_the_path() {
    init_logs();
    for geometry in [TurnGeometry::Normal, TurnGeometry::Wide] {
        let mut req = request(vec![
            Obstacle::new(GridCell::new(6, 10), Heading::West, "a"),
            Obstacle::new(GridCell::new(13, 13), Heading::South, "b"),
        ]);
        req.geometry = geometry;
        let response = plan(&req, &PlannerConfig::default()).unwrap();
        let replayed = response.script.replay(req.start, geometry);
        assert_eq!(replayed, response.states);
    }
}

#[test]
fn boundary_viewpoint_is_rejected_not_clipped() {
    init_logs();
    // clearance pushes the viewing state below the arena edge
    let req = request(vec![Obstacle::new(
        GridCell::new(7, 1),
        Heading::North,
        "edge",
    )]);
    let err = plan(&req, &PlannerConfig::default()).unwrap_err();
    assert_eq!(
        err,
        PlanError::UnreachableViewpoint {
            ids: vec!["edge".to_string()]
        }
    );
}

#[test]
fn split_arena_is_reported_infeasible() {
    init_logs();
    // start on the east side; one target isolated on the west side
    let mut obstacles = wall_obstacles();
    obstacles.push(Obstacle::new(GridCell::new(4, 10), Heading::North, "west"));
    let mut req = request(obstacles);
    req.start = RobotState::at(17, 1, Heading::North);
    let err = plan(&req, &PlannerConfig::default()).unwrap_err();
    assert!(matches!(err, PlanError::NoPathFound { .. }));
}

#[test]
fn capacity_ceiling_is_enforced_before_the_solve() {
    init_logs();
    let obstacles: Vec<Obstacle> = (0..16)
        .map(|i| {
            Obstacle::new(
                GridCell::new(3 + (i % 4) * 4, 3 + (i / 4) * 4),
                Heading::North,
                format!("{i}"),
            )
        })
        .collect();
    let req = request(obstacles);
    let err = plan(&req, &PlannerConfig::default()).unwrap_err();
    assert!(matches!(err, PlanError::CapacityExceeded { .. }));
}

#[test]
fn strategies_agree_under_uniform_costs() {
    init_logs();
    // with every move cost equal, minimum weighted cost and minimum move
    // count coincide, so the two strategies must report the same total
    let mut config = PlannerConfig::default();
    config.costs.straight = 10;
    config.costs.normal_turn = 10;
    config.costs.wide_turn = 10;

    let obstacles = vec![
        Obstacle::new(GridCell::new(8, 12), Heading::North, "a"),
        Obstacle::new(GridCell::new(15, 6), Heading::West, "b"),
    ];
    let mut heuristic_req = request(obstacles.clone());
    heuristic_req.strategy = SearchStrategy::Heuristic;
    let mut exhaustive_req = request(obstacles);
    exhaustive_req.strategy = SearchStrategy::Exhaustive;

    let h = plan(&heuristic_req, &config).unwrap();
    let e = plan(&exhaustive_req, &config).unwrap();
    assert_eq!(h.total_cost, e.total_cost);
}

#[test]
fn surround_sweep_of_a_single_obstacle() {
    init_logs();
    // four registrations of the same cell, one per face: the tour must
    // circle the obstacle and sense all four sides
    let cell = GridCell::new(10, 10);
    let req = request(
        Heading::ALL
            .iter()
            .map(|&h| Obstacle::new(cell, h, h.as_char().to_string()))
            .collect(),
    );
    let response = plan(&req, &PlannerConfig::default()).unwrap();

    let mut order = response.visit_order.clone();
    order.sort();
    assert_eq!(order, vec!["E", "N", "S", "W"]);

    // every face gets sensed; a leg may pass through a viewing state it
    // is not headed for, which legitimately emits an extra pair
    let mut snapped: Vec<&str> = response
        .script
        .commands
        .iter()
        .filter_map(|c| match c {
            Command::Snap { id, .. } => Some(id.as_str()),
            _ => None,
        })
        .collect();
    snapped.sort();
    snapped.dedup();
    assert_eq!(snapped, vec!["E", "N", "S", "W"]);
}

#[test]
fn request_and_response_serialize() {
    init_logs();
    let req = request(vec![Obstacle::new(GridCell::new(5, 5), Heading::North, "1")]);
    let json = serde_json::to_string(&req).unwrap();
    let parsed: PlanRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.start, req.start);
    assert_eq!(parsed.obstacles, req.obstacles);

    let response = plan(&req, &PlannerConfig::default()).unwrap();
    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"Finish\""));
}

#[test]
fn geometry_defaults_to_normal_when_absent() {
    init_logs();
    // transport layers may omit the geometry field entirely
    let json = r#"{
        "width": 20,
        "height": 20,
        "start": { "cell": { "x": 1, "y": 1 }, "heading": "North" },
        "obstacles": [
            { "cell": { "x": 5, "y": 5 }, "facing": "North", "id": "1" }
        ]
    }"#;
    let req: PlanRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.geometry, TurnGeometry::Normal);
    assert_eq!(req.strategy, SearchStrategy::Heuristic);
    assert!(plan(&req, &PlannerConfig::default()).is_ok());
}
