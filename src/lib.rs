//! # Marga-Plan: Turn-Constrained Grid Path Planning
//!
//! A planning library for wheeled robots on a discretized arena. Given a
//! start state and a set of oriented obstacles, it computes a
//! collision-free tour that brings the robot to a viewing position in
//! front of every obstacle face, in the cheapest visiting order, and
//! translates the tour into discrete motion commands for the vehicle.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_plan::{plan, Obstacle, PlanRequest, PlannerConfig};
//! use marga_plan::core::{GridCell, Heading, RobotState};
//!
//! let request = PlanRequest {
//!     width: 20,
//!     height: 20,
//!     start: RobotState::at(1, 1, Heading::North),
//!     obstacles: vec![Obstacle::new(GridCell::new(5, 5), Heading::North, "1")],
//!     geometry: Default::default(),
//!     strategy: Default::default(),
//! };
//! let response = plan(&request, &PlannerConfig::default()).unwrap();
//! println!("cost {} over {} commands", response.total_cost, response.script.commands.len());
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: fundamental types (GridCell, Heading, RobotState)
//! - [`arena`]: occupancy model and obstacle-to-viewpoint projection
//! - [`motion`]: motion primitives and the two turn geometries
//! - [`search`]: point-to-point search (heuristic and exhaustive)
//! - [`route`]: visit-order optimization over all viewpoints
//! - [`commands`]: command token generation and waypoint mapping
//! - [`planner`]: the request/response facade
//!
//! ## Data Flow
//!
//! ```text
//! PlanRequest ──► validate ──► Arena occupancy
//!                                   │
//!                                   ▼
//!                        Viewpoint projection
//!                       (one state per obstacle)
//!                                   │
//!                                   ▼
//!                  Pairwise search ──► cost matrix
//!                                   │
//!                                   ▼
//!                     Subset-DP visit ordering
//!                                   │
//!                                   ▼
//!               Concatenated path ──► CommandScript
//! ```
//!
//! ## Concurrency
//!
//! Planning runs to completion synchronously and owns all of its state;
//! independent requests can run on independent threads without locking.
//! The search engine enforces a node-expansion budget so a pathological
//! request fails with a capacity error instead of running unbounded.

pub mod arena;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod motion;
pub mod planner;
pub mod route;
pub mod search;

// Re-export the main types at crate root
pub use arena::{Arena, Obstacle};
pub use commands::{Command, CommandScript};
pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use motion::TurnGeometry;
pub use planner::{plan, PlanRequest, PlanResponse};
pub use search::{Path, SearchStrategy};
