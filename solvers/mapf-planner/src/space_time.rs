//! Single-agent space-time A* against a [`ReservationTable`] (`spec.md`
//! §4.2).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use mapf_core::{Cell, Grid, Heuristic, TimedCell};

use crate::astar::static_astar;
use crate::cost::timed_transition_cost;
use crate::reservation::ReservationTable;

#[derive(Clone, Eq, PartialEq)]
struct Node {
    state: TimedCell,
    f_cost: u32,
    sequence: u64,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Visited {
    heuristic: f64,
    predecessor: TimedCell,
    best_cost: u32,
}

/// A generous bound on search depth: well beyond any plausible window size,
/// but finite so a pathological reservation layout fails fast instead of
/// hanging (mirrors the defensive `max_timesteps` bound in step-by-step
/// prioritized planners).
pub(crate) fn max_time_budget(grid: &Grid) -> u32 {
    (grid.width() + grid.height()).max(1) * 8 + 64
}

/// Space-time path for `agent` from `start` to `goal`, timestamped from
/// `t = 0`, respecting `reservations`. Returns an empty path if no static
/// path exists at all (a cheap pre-check, `spec.md` §4.2) or if the
/// time-expanded search against reservations is exhausted.
pub fn space_time_astar(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    heuristic: Heuristic,
    penalise_turns: bool,
    reservations: &ReservationTable,
    agent: usize,
) -> Vec<TimedCell> {
    if static_astar(grid, start, goal, heuristic, penalise_turns).is_empty() {
        tracing::debug!(agent, ?start, ?goal, "no static path exists, skipping space-time search");
        return Vec::new();
    }

    let start_state = TimedCell::new(start, 0);
    let max_t = max_time_budget(grid);

    let mut open = BinaryHeap::new();
    let mut visited: HashMap<TimedCell, Visited> = HashMap::new();
    let mut sequence: u64 = 0;

    visited.insert(
        start_state,
        Visited {
            heuristic: heuristic.cost(start, goal),
            predecessor: start_state,
            best_cost: 0,
        },
    );
    open.push(Node {
        state: start_state,
        f_cost: heuristic.cost(start, goal).floor() as u32,
        sequence,
    });

    while let Some(current) = open.pop() {
        if current.state.cell() == goal {
            let path = reconstruct_path(&visited, start_state, current.state);
            tracing::trace!(agent, steps = path.len(), "space-time search reached goal");
            return path;
        }
        if current.state.t >= max_t {
            continue;
        }

        let current_cost = visited[&current.state].best_cost;
        let predecessor_state = visited[&current.state].predecessor;
        let predecessor = (predecessor_state != current.state).then_some(predecessor_state.cell());

        let next_t = current.state.t + 1;
        let current_cell = current.state.cell();

        let open_neighbours: Vec<Cell> = grid.open_neighbours(current_cell).collect();

        // The wait option is only meaningful when at least one spatial
        // neighbour is blocked by a reservation at `next_t` — an
        // unconditional wait explodes the state space and lets agents idle
        // against static obstacles for no reason (`spec.md` §4.2).
        let any_neighbour_blocked = open_neighbours
            .iter()
            .any(|&n| !reservations.is_free(n, next_t, agent) || reservations.is_swap(current_cell, n, current.state.t, agent));

        let mut candidates: Vec<(Cell, bool)> = open_neighbours.into_iter().map(|n| (n, false)).collect();
        if any_neighbour_blocked {
            candidates.push((current_cell, true));
        }

        for (neighbour, is_wait) in candidates {
            if !is_wait {
                if !reservations.is_free(neighbour, next_t, agent) {
                    continue; // occupied next step
                }
                if reservations.is_swap(current_cell, neighbour, current.state.t, agent) {
                    continue; // would swap with another agent
                }
            } else if !reservations.is_free(current_cell, next_t, agent) {
                // Waiting agent itself must not overlap a reservation at its
                // own resting cell either.
                continue;
            }

            let step_cost = timed_transition_cost(penalise_turns, predecessor, current_cell, neighbour, is_wait);
            let tentative_cost = current_cost + step_cost;
            let next_state = TimedCell::new(neighbour, next_t);

            let h = match visited.get(&next_state) {
                Some(existing) => {
                    if tentative_cost >= existing.best_cost {
                        continue;
                    }
                    existing.heuristic
                }
                None => heuristic.cost(neighbour, goal),
            };

            visited.insert(
                next_state,
                Visited {
                    heuristic: h,
                    predecessor: current.state,
                    best_cost: tentative_cost,
                },
            );
            sequence += 1;
            open.push(Node {
                state: next_state,
                f_cost: tentative_cost + h.floor() as u32,
                sequence,
            });
        }
    }

    tracing::warn!(agent, ?start, ?goal, "space-time search exhausted without reaching goal");
    Vec::new()
}

fn reconstruct_path(visited: &HashMap<TimedCell, Visited>, start: TimedCell, goal: TimedCell) -> Vec<TimedCell> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = visited[&current].predecessor;
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_reservations_matches_static_length() {
        let grid = Grid::empty(5, 5);
        let reservations = ReservationTable::new();
        let path = space_time_astar(
            &grid,
            Cell::new(0, 0),
            Cell::new(0, 2),
            Heuristic::Manhattan,
            true,
            &reservations,
            0,
        );
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].t, 0);
        assert_eq!(path[2].t, 2);
    }

    #[test]
    fn time_is_monotonic_and_motion_is_valid() {
        let grid = Grid::empty(6, 6);
        let reservations = ReservationTable::new();
        let path = space_time_astar(
            &grid,
            Cell::new(0, 0),
            Cell::new(5, 5),
            Heuristic::Manhattan,
            true,
            &reservations,
            0,
        );
        assert!(!path.is_empty());
        for (i, step) in path.iter().enumerate() {
            assert_eq!(step.t, i as u32);
        }
        for pair in path.windows(2) {
            let same_cell = pair[0].cell() == pair[1].cell();
            let adjacent = mapf_core::is_adjacent(pair[0].cell(), pair[1].cell());
            assert!(same_cell || adjacent);
        }
    }

    #[test]
    fn waits_to_avoid_a_reserved_cell() {
        // A single-row corridor: no detour is possible, so avoiding the
        // block at (0,1)/t=1 forces an actual wait at (0,0).
        let grid = Grid::empty(1, 3);
        let mut reservations = ReservationTable::new();
        reservations.commit_plan(&[TimedCell::new(Cell::new(0, 1), 1)], 99, 1);

        let path = space_time_astar(
            &grid,
            Cell::new(0, 0),
            Cell::new(0, 2),
            Heuristic::Manhattan,
            true,
            &reservations,
            0,
        );
        assert!(!path.is_empty());
        assert_eq!(path[0].cell(), Cell::new(0, 0));
        assert_eq!(path[1].cell(), Cell::new(0, 0), "agent must wait one step");
        // The agent must not occupy the blocked cell at the blocked time.
        for step in &path {
            assert!(!(step.cell() == Cell::new(0, 1) && step.t == 1));
        }
    }

    #[test]
    fn start_on_goal_trivial_path() {
        let grid = Grid::empty(3, 3);
        let reservations = ReservationTable::new();
        let path = space_time_astar(
            &grid,
            Cell::new(1, 1),
            Cell::new(1, 1),
            Heuristic::Manhattan,
            true,
            &reservations,
            0,
        );
        assert_eq!(path, vec![TimedCell::new(Cell::new(1, 1), 0)]);
    }

    #[test]
    fn unreachable_static_goal_returns_empty() {
        let mut cells = vec![mapf_core::CellKind::Free; 9];
        cells[8] = mapf_core::CellKind::PermanentObstacle;
        let grid = Grid::new(3, 3, cells);
        let reservations = ReservationTable::new();
        let path = space_time_astar(
            &grid,
            Cell::new(0, 0),
            Cell::new(2, 2),
            Heuristic::Manhattan,
            true,
            &reservations,
            0,
        );
        assert!(path.is_empty());
    }
}
