//! Command token generation.
//!
//! Translates a concatenated state path into the linear command sequence
//! the vehicle firmware consumes. Straight runs coalesce into one token
//! carrying the cumulative distance (10 units per cell move); turns stay
//! one token each; passing through a registered viewing state emits a
//! sensing token followed by a one-tick no-op so the capture settles
//! before the next motion; a finish token terminates the script.
//!
//! Each command also maps back to the path index it completes at, so
//! callers can correlate commands with physical waypoints (coalesced
//! tokens consume several path states, sensing tokens consume none).

use std::collections::HashMap;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::{Heading, RobotState};
use crate::motion::{Move, TurnGeometry};
use crate::search::Path;

/// Distance units one straight move covers.
pub const DISTANCE_QUANTUM: u32 = 10;

/// Quadrant variant of a turn command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnQuadrant {
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

impl TurnQuadrant {
    fn from_move(mv: Move) -> Option<Self> {
        match mv {
            Move::TurnForwardLeft => Some(TurnQuadrant::ForwardLeft),
            Move::TurnForwardRight => Some(TurnQuadrant::ForwardRight),
            Move::TurnBackwardLeft => Some(TurnQuadrant::BackwardLeft),
            Move::TurnBackwardRight => Some(TurnQuadrant::BackwardRight),
            Move::Forward | Move::Backward => None,
        }
    }

    fn to_move(self) -> Move {
        match self {
            TurnQuadrant::ForwardLeft => Move::TurnForwardLeft,
            TurnQuadrant::ForwardRight => Move::TurnForwardRight,
            TurnQuadrant::BackwardLeft => Move::TurnBackwardLeft,
            TurnQuadrant::BackwardRight => Move::TurnBackwardRight,
        }
    }
}

/// A discrete motion or sensing command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Drive straight ahead for `distance` units.
    Forward { distance: u32 },
    /// Reverse straight for `distance` units.
    Backward { distance: u32 },
    /// Execute one quarter turn.
    Turn {
        quadrant: TurnQuadrant,
        geometry: TurnGeometry,
    },
    /// Capture the obstacle face; `heading` is the robot heading at capture.
    Snap { id: String, heading: Heading },
    /// One-tick delay.
    Noop,
    /// End of script.
    Finish,
}

/// Generated command sequence with its path-index mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandScript {
    pub commands: Vec<Command>,
    /// For each command, the index of the path state it completes at.
    pub waypoints: Vec<usize>,
}

impl CommandScript {
    /// Replay the script as motion primitives from `start`.
    ///
    /// Expands distance tokens back into unit moves and turn tokens into
    /// their quadrant moves; the result is exactly the state sequence the
    /// script was generated from. Sensing and finish tokens move nothing.
    pub fn replay(&self, start: RobotState, geometry: TurnGeometry) -> Vec<RobotState> {
        let mut states = vec![start];
        let mut cursor = start;
        for command in &self.commands {
            match command {
                Command::Forward { distance } => {
                    for _ in 0..(distance / DISTANCE_QUANTUM) {
                        cursor = Move::Forward.apply(cursor, geometry);
                        states.push(cursor);
                    }
                }
                Command::Backward { distance } => {
                    for _ in 0..(distance / DISTANCE_QUANTUM) {
                        cursor = Move::Backward.apply(cursor, geometry);
                        states.push(cursor);
                    }
                }
                Command::Turn { quadrant, .. } => {
                    cursor = quadrant.to_move().apply(cursor, geometry);
                    states.push(cursor);
                }
                Command::Snap { .. } | Command::Noop | Command::Finish => {}
            }
        }
        states
    }
}

/// Pending straight run during coalescing.
struct StraightRun {
    forward: bool,
    cells: u32,
    end_index: usize,
}

/// Generate the command script for a path.
///
/// `snap_points` maps viewing states to the obstacle identifier captured
/// there; a sensing pair is emitted every time the path passes through
/// one, and a snap interrupts straight-run coalescing so command order
/// matches travel order.
pub fn generate(
    path: &Path,
    snap_points: &HashMap<RobotState, String>,
    geometry: TurnGeometry,
) -> CommandScript {
    let states = path.states();
    let moves = path.moves();

    let mut commands = Vec::new();
    let mut waypoints = Vec::new();
    let mut run: Option<StraightRun> = None;

    let flush = |run: &mut Option<StraightRun>,
                 commands: &mut Vec<Command>,
                 waypoints: &mut Vec<usize>| {
        if let Some(r) = run.take() {
            let distance = r.cells * DISTANCE_QUANTUM;
            commands.push(if r.forward {
                Command::Forward { distance }
            } else {
                Command::Backward { distance }
            });
            waypoints.push(r.end_index);
        }
    };

    let emit_snap = |index: usize,
                     commands: &mut Vec<Command>,
                     waypoints: &mut Vec<usize>| {
        if let Some(id) = snap_points.get(&states[index]) {
            commands.push(Command::Snap {
                id: id.clone(),
                heading: states[index].heading,
            });
            waypoints.push(index);
            commands.push(Command::Noop);
            waypoints.push(index);
        }
    };

    emit_snap(0, &mut commands, &mut waypoints);

    for (i, &mv) in moves.iter().enumerate() {
        match mv {
            Move::Forward | Move::Backward => {
                let forward = mv == Move::Forward;
                match run {
                    Some(ref mut r) if r.forward == forward => {
                        r.cells += 1;
                        r.end_index = i + 1;
                    }
                    _ => {
                        flush(&mut run, &mut commands, &mut waypoints);
                        run = Some(StraightRun {
                            forward,
                            cells: 1,
                            end_index: i + 1,
                        });
                    }
                }
            }
            _ => {
                flush(&mut run, &mut commands, &mut waypoints);
                commands.push(Command::Turn {
                    quadrant: TurnQuadrant::from_move(mv).expect("turn move"),
                    geometry,
                });
                waypoints.push(i + 1);
            }
        }

        if snap_points.contains_key(&states[i + 1]) {
            flush(&mut run, &mut commands, &mut waypoints);
            emit_snap(i + 1, &mut commands, &mut waypoints);
        }
    }

    flush(&mut run, &mut commands, &mut waypoints);
    commands.push(Command::Finish);
    waypoints.push(states.len() - 1);

    trace!(
        "[Commands] {} commands for {} states",
        commands.len(),
        states.len()
    );

    CommandScript {
        commands,
        waypoints,
    }
}
