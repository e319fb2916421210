//! Fundamental types shared by every planning stage.
//!
//! The arena is a discrete grid: `GridCell` addresses a cell, `Heading` is
//! one of the four cardinal orientations, and `RobotState` combines both
//! into the vertex type the search engine operates on.

pub mod cell;
pub mod heading;
pub mod state;

pub use cell::GridCell;
pub use heading::Heading;
pub use state::RobotState;
