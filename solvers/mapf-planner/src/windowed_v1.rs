//! Windowed cooperative A*: plan every agent a bounded number of steps at a
//! time, reprioritising between windows (`spec.md` §4.5).

use mapf_core::{Agent, Cell, ConfigError, Grid, Heuristic, TimedCell};

use crate::reprioritisation::Reprioritisation;
use crate::reservation::ReservationTable;
use crate::space_time::space_time_astar;
use crate::window::{stitch_window_slice, validate};

#[derive(Debug, Clone, Copy)]
pub struct WindowedV1Config {
    /// Number of steps planned and committed per window before the agents
    /// are reprioritised and the next window begins.
    pub window_size: i64,
    pub heuristic: Heuristic,
    pub penalise_turns: bool,
    pub reprioritisation: Reprioritisation,
}

/// Plan every agent from `agent.current_start` (mutated window by window)
/// to its goal, a window at a time.
///
/// An agent whose space-time search fails in some window is dropped from
/// all future windows and keeps whatever partial path it had accumulated
/// so far — windowed v1 never aborts the whole call for a single agent's
/// unreachability (`spec.md` §7).
pub fn plan(
    grid: &Grid,
    agents: &mut [Agent],
    goals: &[Cell],
    config: &WindowedV1Config,
) -> Result<Vec<Vec<TimedCell>>, ConfigError> {
    let window_size = validate(agents.len(), goals.len(), config.window_size)?;
    let n = agents.len();

    let mut accumulated: Vec<Vec<TimedCell>> = vec![Vec::new(); n];
    let mut resolved = vec![false; n];
    let mut active: Vec<usize> = (0..n).collect();
    let mut round: u64 = 0;

    while !active.is_empty() {
        tracing::debug!(round, active = active.len(), "windowed v1: starting window");
        let positions: Vec<Cell> = agents.iter().map(|a| a.current_start).collect();
        config.reprioritisation.reorder(&mut active, round, &positions, goals, config.heuristic);

        let mut reservations = ReservationTable::new();
        let mut finished_this_round = Vec::new();

        for &i in &active {
            let raw = space_time_astar(
                grid,
                agents[i].current_start,
                goals[i],
                config.heuristic,
                config.penalise_turns,
                &reservations,
                i,
            );
            if raw.is_empty() {
                tracing::warn!(agent = i, round, "windowed v1: agent stuck with no forward progress, terminating");
                resolved[i] = true; // permanently unreachable, stop retrying
                finished_this_round.push(i);
                continue;
            }
            reservations.commit_plan(&raw, i, window_size);
            let (next_start, finished) = stitch_window_slice(&mut accumulated[i], &raw, window_size, goals[i]);
            agents[i].current_start = next_start;
            if finished {
                resolved[i] = true;
                finished_this_round.push(i);
            }
        }

        active.retain(|i| !resolved[*i]);
        round += 1;
    }

    Ok(accumulated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(window_size: i64) -> WindowedV1Config {
        WindowedV1Config {
            window_size,
            heuristic: Heuristic::Manhattan,
            penalise_turns: true,
            reprioritisation: Reprioritisation::RoundRobin,
        }
    }

    #[test]
    fn rejects_non_positive_window_size() {
        let grid = Grid::empty(3, 3);
        let mut agents = [Agent::new(0, Cell::new(0, 0), 0, 0)];
        let goals = [Cell::new(0, 1)];
        let result = plan(&grid, &mut agents, &goals, &config(0));
        assert!(matches!(result, Err(ConfigError::NonPositiveWindowSize(0))));
    }

    #[test]
    fn single_agent_reaches_goal_regardless_of_window_size() {
        let grid = Grid::empty(5, 5);
        let mut agents = [Agent::new(0, Cell::new(0, 0), 0, 0)];
        let goals = [Cell::new(4, 4)];
        let paths = plan(&grid, &mut agents, &goals, &config(2)).unwrap();
        assert_eq!(paths[0].first().unwrap().cell(), Cell::new(0, 0));
        assert_eq!(paths[0].last().unwrap().cell(), Cell::new(4, 4));
        for (i, step) in paths[0].iter().enumerate() {
            assert_eq!(step.t, i as u32);
        }
    }

    #[test]
    fn three_agent_round_robin_corridor_scenario_5() {
        // spec.md §8 scenario 5: three agents funnelling through a shared
        // 1-wide corridor, windowed with a small window and round-robin
        // reprioritisation between windows.
        let grid = Grid::empty(3, 5);
        let mut agents = [
            Agent::new(0, Cell::new(0, 0), 0, 0),
            Agent::new(1, Cell::new(1, 0), 0, 0),
            Agent::new(2, Cell::new(2, 0), 0, 0),
        ];
        let goals = [Cell::new(0, 4), Cell::new(1, 4), Cell::new(2, 4)];
        let paths = plan(&grid, &mut agents, &goals, &config(2)).unwrap();

        for (path, goal) in paths.iter().zip(goals.iter()) {
            assert!(!path.is_empty());
            assert_eq!(path.last().unwrap().cell(), *goal);
        }
        // No two agents ever share a cell at the same global time.
        for a in 0..paths.len() {
            for b in (a + 1)..paths.len() {
                for step_a in &paths[a] {
                    for step_b in &paths[b] {
                        if step_a.t == step_b.t {
                            assert_ne!(step_a.cell(), step_b.cell());
                        }
                    }
                }
            }
        }
    }
}
