//! Core types shared by every planning strategy: the grid, agents, timed
//! cells, heuristics, and the error types raised when a planner is
//! misconfigured or a grid fails to parse.

mod agent;
mod error;
mod grid;
mod heuristic;
mod timed_cell;

pub use agent::Agent;
pub use error::{ConfigError, GridError};
pub use grid::{is_adjacent, Cell, CellKind, Grid};
pub use heuristic::Heuristic;
pub use timed_cell::TimedCell;
