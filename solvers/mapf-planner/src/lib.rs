//! Single- and multi-agent path planners for cooperative grid pathfinding.
//!
//! Building blocks, leaves first:
//! - [`astar`]: static single-agent grid A* with an optional turn penalty.
//! - [`space_time`]: single-agent A* over `(row, col, t)` against a
//!   [`reservation::ReservationTable`].
//! - [`reservation`]: the shared space-time reservation vocabulary,
//!   including tail reservations for agents at rest.
//! - [`fixed_priority`]: decoupled CA* with a fixed agent order.
//! - [`windowed_v1`]: windowed CA* with per-window reprioritisation.
//! - [`windowed_v2`]: windowed CA* with adaptive window shrinking.

mod cost;
pub mod error;
pub mod fixed_priority;
pub mod reprioritisation;
pub mod reservation;
mod window;
pub mod windowed_v1;
pub mod windowed_v2;

pub mod astar;
pub mod space_time;

pub use astar::static_astar;
pub use error::PlanningError;
pub use reprioritisation::Reprioritisation;
pub use reservation::ReservationTable;
pub use space_time::space_time_astar;
pub use windowed_v1::WindowedV1Config;
pub use windowed_v2::WindowedV2Config;
