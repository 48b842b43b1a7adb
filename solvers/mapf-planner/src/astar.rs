//! Single-agent grid A* with an optional turn penalty (`spec.md` §4.1).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use mapf_core::{Cell, Grid, Heuristic};

use crate::cost::static_transition_cost;

/// One entry in A*'s open set. Ties on `f_cost` break on `sequence`, the
/// insertion order, so the heap behaves deterministically regardless of
/// hash-map iteration order.
#[derive(Clone, Eq, PartialEq)]
struct Node {
    cell: Cell,
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
    predecessor: Cell,
    best_cost: u32,
}

/// Shortest path from `start` to `goal` on `grid`, or an empty path if
/// `goal` is unreachable (including `start`/`goal` on an obstacle).
///
/// The goal test happens on dequeue, not on enqueue, so the priority
/// ordering is respected (`spec.md` §4.1).
pub fn static_astar(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    heuristic: Heuristic,
    penalise_turns: bool,
) -> Vec<Cell> {
    if !grid.is_open(start) || !grid.is_open(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let mut open = BinaryHeap::new();
    let mut visited: HashMap<Cell, Visited> = HashMap::new();
    let mut sequence: u64 = 0;

    visited.insert(
        start,
        Visited {
            heuristic: heuristic.cost(start, goal),
            predecessor: start,
            best_cost: 0,
        },
    );
    open.push(Node {
        cell: start,
        f_cost: heuristic.cost(start, goal).floor() as u32,
        sequence,
    });

    while let Some(current) = open.pop() {
        if current.cell == goal {
            return reconstruct_path(&visited, start, goal);
        }

        let current_cost = visited[&current.cell].best_cost;
        // Stale heap entry: a cheaper path to this cell was already found.
        let predecessor = visited[&current.cell].predecessor;
        let predecessor = (predecessor != current.cell).then_some(predecessor);

        for neighbour in grid.open_neighbours(current.cell) {
            let step_cost = static_transition_cost(penalise_turns, predecessor, current.cell, neighbour);
            let tentative_cost = current_cost + step_cost;

            // Heuristic is only evaluated the first time a node is
            // discovered; later relaxations reuse the cached value.
            let h = match visited.get(&neighbour) {
                Some(existing) => {
                    if tentative_cost >= existing.best_cost {
                        continue;
                    }
                    existing.heuristic
                }
                None => heuristic.cost(neighbour, goal),
            };
            visited.insert(
                neighbour,
                Visited {
                    heuristic: h,
                    predecessor: current.cell,
                    best_cost: tentative_cost,
                },
            );
            sequence += 1;
            open.push(Node {
                cell: neighbour,
                f_cost: tentative_cost + h.floor() as u32,
                sequence,
            });
        }
    }

    Vec::new()
}

fn reconstruct_path(visited: &HashMap<Cell, Visited>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = visited[&current].predecessor;
        path.push(current);
    }
    path.reverse();
    path
}
