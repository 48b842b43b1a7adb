//! Fixed-priority cooperative A*: plan agents once, in the given order,
//! each against the reservations already committed by earlier agents
//! (`spec.md` §4.4).

use mapf_core::{Cell, ConfigError, Grid, Heuristic, TimedCell};

use crate::reservation::ReservationTable;
use crate::space_time::{max_time_budget, space_time_astar};

/// Plan every agent once, `starts[i] -> goals[i]`, in array order.
///
/// Agent `i`'s search sees the full committed paths of agents `0..i`; an
/// unreachable agent gets an empty path and planning continues with the
/// rest (`spec.md` §7) — only malformed input (empty list, length
/// mismatch) raises an error.
pub fn plan(
    grid: &Grid,
    starts: &[Cell],
    goals: &[Cell],
    heuristic: Heuristic,
    penalise_turns: bool,
) -> Result<Vec<Vec<TimedCell>>, ConfigError> {
    if starts.is_empty() {
        return Err(ConfigError::EmptyAgentList);
    }
    if starts.len() != goals.len() {
        return Err(ConfigError::StartGoalLengthMismatch {
            starts: starts.len(),
            goals: goals.len(),
        });
    }

    // There is no window horizon here: once an agent's path is committed
    // it holds for the whole call, so its resting cell is reserved out to
    // the same depth bound any later agent's own search can reach.
    let horizon = max_time_budget(grid);

    let mut reservations = ReservationTable::new();
    let mut paths = Vec::with_capacity(starts.len());

    for (agent, (&start, &goal)) in starts.iter().zip(goals.iter()).enumerate() {
        let path = space_time_astar(grid, start, goal, heuristic, penalise_turns, &reservations, agent);
        if path.is_empty() {
            tracing::warn!(agent, "fixed-priority plan: agent has no reachable path, reporting empty");
        } else {
            tracing::debug!(agent, steps = path.len(), "fixed-priority plan: agent path committed");
            reservations.commit_plan(&path, agent, horizon);
        }
        paths.push(path);
    }

    Ok(paths)
}
