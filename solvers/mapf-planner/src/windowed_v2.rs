//! Windowed cooperative A* with adaptive window shrinking (`spec.md`
//! §4.6): a window's effective size shrinks to the shortest raw path
//! discovered among the agents active in that round, so nobody commits a
//! longer reservation tail than the round actually supports.
//!
//! Priority within a window is fixed by the algorithm itself, not by a
//! caller-chosen strategy (`spec.md` §4.6(1)): agents are ordered each
//! round by ascending *previous* round's plan length, shortest first, so
//! agents closest to finishing are planned — and hence reserve their
//! resting cell — before everyone else in the same window. Ties (including
//! every agent's first round, where there is no previous plan length yet)
//! are broken by stable order, i.e. the order carried over from the
//! previous round's sort, or the original agent index on round zero.
//!
//! Implemented as two passes over the active agents, in that priority
//! order: pass one runs every agent's space-time search against a
//! reservation table built up incrementally, and along the way discovers
//! the round's final (possibly-shrunk) window size — a raw path never
//! depends on the window size, only its tail-reservation length and
//! output slicing do. Pass two then reslices every agent's already-found
//! raw path against that finalized window size (no new reservation table
//! is needed here: each round starts a fresh one regardless), which
//! reproduces "retroactively trim the higher-priority agents planned
//! earlier this round" without re-running search.

use mapf_core::{Agent, Cell, Grid, TimedCell};

use crate::error::PlanningError;
use crate::reservation::ReservationTable;
use crate::space_time::space_time_astar;
use crate::window::{stitch_window_slice, validate};

#[derive(Debug, Clone, Copy)]
pub struct WindowedV2Config {
    pub window_size: i64,
    pub heuristic: mapf_core::Heuristic,
    pub penalise_turns: bool,
}

/// Plan every agent from `agent.current_start` to its goal, a window at a
/// time, shrinking the window adaptively each round.
///
/// The first agent whose space-time search returns no path aborts the
/// whole call with `PlanningError::UnreachableAgent` — windowed v2 never
/// returns a partial result silently (`spec.md` §7).
pub fn plan(
    grid: &Grid,
    agents: &mut [Agent],
    goals: &[Cell],
    config: &WindowedV2Config,
) -> Result<Vec<Vec<TimedCell>>, PlanningError> {
    let configured_window = validate(agents.len(), goals.len(), config.window_size)?;
    let n = agents.len();

    let mut accumulated: Vec<Vec<TimedCell>> = vec![Vec::new(); n];
    let mut active: Vec<usize> = (0..n).collect();
    // No agent has a previous-round plan length yet; giving them all the
    // same key keeps `sort_by_key`'s stability and falls back to the
    // original agent index for round zero's ties.
    let mut last_plan_len = vec![u32::MAX; n];
    let mut round: u64 = 0;

    while !active.is_empty() {
        tracing::debug!(round, active = active.len(), "windowed v2: starting window");
        // Ascending previous-round plan length, shortest first, ties
        // broken by stable order (spec.md §4.6(1)).
        active.sort_by_key(|&i| last_plan_len[i]);

        // Pass 1: discover every active agent's raw path and the round's
        // final window size.
        let mut discovery_reservations = ReservationTable::new();
        let mut effective_window = configured_window;
        let mut raw_paths = Vec::with_capacity(active.len());

        for &i in &active {
            let raw = space_time_astar(
                grid,
                agents[i].current_start,
                goals[i],
                config.heuristic,
                config.penalise_turns,
                &discovery_reservations,
                i,
            );
            if raw.is_empty() {
                tracing::warn!(agent = i, round, "windowed v2: agent unreachable, aborting whole call");
                return Err(PlanningError::UnreachableAgent { agent: i });
            }
            discovery_reservations.commit_plan(&raw, i, effective_window);
            last_plan_len[i] = raw.len() as u32;

            let steps = raw.len() as u32 - 1;
            if steps > 0 && steps < effective_window {
                tracing::debug!(round, from = effective_window, to = steps, "windowed v2: shrinking window");
                effective_window = steps;
            }
            raw_paths.push((i, raw));
        }

        // Pass 2: recommit and reslice every agent against the finalized
        // window size.
        let mut finished_this_round = Vec::new();
        for (i, raw) in &raw_paths {
            let (next_start, finished) = stitch_window_slice(&mut accumulated[*i], raw, effective_window, goals[*i]);
            agents[*i].current_start = next_start;
            if finished {
                finished_this_round.push(*i);
            }
        }

        active.retain(|i| !finished_this_round.contains(i));
        round += 1;
    }

    Ok(accumulated)
}
