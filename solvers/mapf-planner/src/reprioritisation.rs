//! Between-round priority reordering for the windowed planners (`spec.md`
//! §4.5, §4.6).

use std::cmp::Ordering;

use mapf_core::{Cell, ConfigError, Heuristic};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// How the planner picks the agent order for the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reprioritisation {
    /// Shuffle with a deterministic per-round seed derived from a base seed,
    /// so the same base seed always reproduces the same sequence of orders.
    Randomised(u64),
    /// Rotate the order left by one each round, so every agent eventually
    /// leads. Rotating *left* (not right) is deliberate: rotating right
    /// would give the agent that just moved to the back of the line the
    /// very next turn again, not a fair share of low-priority slots.
    RoundRobin,
    /// Sort ascending by heuristic distance from current position to goal:
    /// agents closest to finishing go first, on the theory that they free
    /// up their cells for everyone else soonest.
    ShortestAbstractPathFirst,
}

impl Reprioritisation {
    /// Parse a config tag. `seed` is only consulted for `"randomised"`.
    pub fn parse(tag: &str, seed: u64) -> Result<Self, ConfigError> {
        match tag {
            "randomised" => Ok(Reprioritisation::Randomised(seed)),
            "round_robin" => Ok(Reprioritisation::RoundRobin),
            "shortest_abstract_path_first" => Ok(Reprioritisation::ShortestAbstractPathFirst),
            other => Err(ConfigError::UnknownReprioritisation(other.to_string())),
        }
    }

    /// Reorder `order` (indices into the agent list) in place for `round`
    /// (0-based, incremented once per windowed planning iteration).
    pub fn reorder(
        &self,
        order: &mut [usize],
        round: u64,
        positions: &[Cell],
        goals: &[Cell],
        heuristic: Heuristic,
    ) {
        match self {
            Reprioritisation::Randomised(seed) => {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(round));
                order.shuffle(&mut rng);
            }
            Reprioritisation::RoundRobin => {
                if order.len() > 1 {
                    order.rotate_left(1);
                }
            }
            Reprioritisation::ShortestAbstractPathFirst => {
                order.sort_by(|&a, &b| {
                    let da = heuristic.cost(positions[a], goals[a]);
                    let db = heuristic.cost(positions[b], goals[b]);
                    da.partial_cmp(&db).unwrap_or(Ordering::Equal)
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_tags() {
        assert_eq!(Reprioritisation::parse("round_robin", 0), Ok(Reprioritisation::RoundRobin));
        assert_eq!(
            Reprioritisation::parse("shortest_abstract_path_first", 0),
            Ok(Reprioritisation::ShortestAbstractPathFirst)
        );
        assert_eq!(Reprioritisation::parse("randomised", 42), Ok(Reprioritisation::Randomised(42)));
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!(Reprioritisation::parse("bogus", 0).is_err());
    }

    #[test]
    fn round_robin_rotates_left() {
        let mut order = vec![0, 1, 2, 3];
        Reprioritisation::RoundRobin.reorder(&mut order, 0, &[], &[], Heuristic::Manhattan);
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn round_robin_is_stable_on_singleton() {
        let mut order = vec![0];
        Reprioritisation::RoundRobin.reorder(&mut order, 0, &[], &[], Heuristic::Manhattan);
        assert_eq!(order, vec![0]);
    }

    #[test]
    fn same_seed_reproduces_same_order() {
        let mut a = vec![0, 1, 2, 3, 4];
        let mut b = vec![0, 1, 2, 3, 4];
        let strategy = Reprioritisation::Randomised(7);
        strategy.reorder(&mut a, 3, &[], &[], Heuristic::Manhattan);
        strategy.reorder(&mut b, 3, &[], &[], Heuristic::Manhattan);
        assert_eq!(a, b);
    }

    #[test]
    fn shortest_abstract_path_first_sorts_ascending_by_distance() {
        let positions = vec![Cell::new(0, 0), Cell::new(0, 0), Cell::new(0, 0)];
        let goals = vec![Cell::new(0, 5), Cell::new(0, 1), Cell::new(0, 3)];
        let mut order = vec![0, 1, 2];
        Reprioritisation::ShortestAbstractPathFirst.reorder(&mut order, 0, &positions, &goals, Heuristic::Manhattan);
        assert_eq!(order, vec![1, 2, 0]);
    }
}
