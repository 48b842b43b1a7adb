//! Shared transition-cost helpers for static and space-time A*.
//!
//! Both searches charge straight continuations less than turns; the exact
//! numbers differ (space-time search also prices waiting) but the "is this
//! a straight continuation of the incoming edge" test is identical, so it
//! lives here once.

use mapf_core::{is_adjacent, Cell};

/// True iff `predecessor -> current -> neighbour` continues along the same
/// axis (no direction change at `current`).
pub fn continues_straight(predecessor: Cell, current: Cell, neighbour: Cell) -> bool {
    if predecessor == current {
        return false;
    }
    let in_dr = current.row as i64 - predecessor.row as i64;
    let in_dc = current.col as i64 - predecessor.col as i64;
    let out_dr = neighbour.row as i64 - current.row as i64;
    let out_dc = neighbour.col as i64 - current.col as i64;
    (in_dr, in_dc) == (out_dr, out_dc)
}

/// Static-A* transition cost (`spec.md` §4.1): straight continuation is 1,
/// any other 4-adjacent move is 2, and a defensive 3 for anything that
/// would be diagonal (never reached with 4-connected neighbours, kept for
/// parity with the design's described branch).
pub fn static_transition_cost(
    penalise_turns: bool,
    predecessor: Option<Cell>,
    current: Cell,
    neighbour: Cell,
) -> u32 {
    if penalise_turns {
        if let Some(pred) = predecessor {
            if continues_straight(pred, current, neighbour) {
                return 1;
            }
        }
    }
    if is_adjacent(current, neighbour) {
        2
    } else {
        3
    }
}

/// Space-time A* transition cost (`spec.md` §4.2): a wait is 1, a penalised
/// straight continuation is 2, any other 4-adjacent move is 3, and a
/// defensive 4 for the (unreachable with 4-connected neighbours) diagonal
/// branch.
pub fn timed_transition_cost(
    penalise_turns: bool,
    predecessor: Option<Cell>,
    current: Cell,
    neighbour: Cell,
    is_wait: bool,
) -> u32 {
    if is_wait {
        return 1;
    }
    if penalise_turns {
        if let Some(pred) = predecessor {
            if continues_straight(pred, current, neighbour) {
                return 2;
            }
        }
    }
    if is_adjacent(current, neighbour) {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn straight_continuation_detected() {
        let p = Cell::new(0, 0);
        let c = Cell::new(0, 1);
        let n = Cell::new(0, 2);
        assert!(continues_straight(p, c, n));
    }

    #[test]
    fn turn_not_straight() {
        let p = Cell::new(0, 0);
        let c = Cell::new(0, 1);
        let n = Cell::new(1, 1);
        assert!(!continues_straight(p, c, n));
    }

    #[test]
    fn static_cost_matches_spec_table() {
        let p = Cell::new(0, 0);
        let c = Cell::new(0, 1);
        let straight = Cell::new(0, 2);
        let turn = Cell::new(1, 1);
        assert_eq!(static_transition_cost(true, Some(p), c, straight), 1);
        assert_eq!(static_transition_cost(true, Some(p), c, turn), 2);
        assert_eq!(static_transition_cost(true, None, c, turn), 2);
    }

    #[test]
    fn timed_cost_matches_spec_table() {
        let p = Cell::new(0, 0);
        let c = Cell::new(0, 1);
        let straight = Cell::new(0, 2);
        let turn = Cell::new(1, 1);
        assert_eq!(timed_transition_cost(true, Some(p), c, c, true), 1);
        assert_eq!(timed_transition_cost(true, Some(p), c, straight, false), 2);
        assert_eq!(timed_transition_cost(true, Some(p), c, turn, false), 3);
        assert_eq!(timed_transition_cost(false, Some(p), c, straight, false), 3);
    }
}
