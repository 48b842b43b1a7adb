//! Space-time reservation table: `(row, col, t) -> agent id`, the shared
//! vocabulary cooperative planners use to avoid each other (`spec.md` §3,
//! §4.3).

use std::collections::HashMap;

use mapf_core::{Cell, TimedCell};

/// Scoped to a single planning call (fixed-priority) or a single window
/// (windowed variants); never shared or reused beyond that.
#[derive(Debug, Default, Clone)]
pub struct ReservationTable {
    reserved: HashMap<(u32, u32, u32), usize>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent holding `(row, col, t)`, if any.
    pub fn holder(&self, cell: Cell, t: u32) -> Option<usize> {
        self.reserved.get(&(cell.row, cell.col, t)).copied()
    }

    pub fn is_free(&self, cell: Cell, t: u32, agent: usize) -> bool {
        match self.holder(cell, t) {
            None => true,
            Some(holder) => holder == agent,
        }
    }

    /// True iff moving `agent` from `from` (at time `t`) to `to` (at time
    /// `t+1`) would swap positions with another agent
    /// (`spec.md` §3 swap-prevention invariant, checked at neighbour
    /// expansion time per §4.2).
    pub fn is_swap(&self, from: Cell, to: Cell, t: u32, agent: usize) -> bool {
        match (self.holder(to, t), self.holder(from, t + 1)) {
            (Some(mover_at_to), Some(mover_at_from)) => {
                mover_at_to == mover_at_from && mover_at_to != agent
            }
            _ => false,
        }
    }

    fn reserve(&mut self, cell: Cell, t: u32, agent: usize) {
        self.reserved.insert((cell.row, cell.col, t), agent);
    }

    /// Commit `plan` (relative times starting at 0) for `agent`, reserving
    /// every step up through `window_size` or the plan's end (whichever is
    /// earlier), and tail-reserving the final resting cell through
    /// `window_size` if the plan finishes before the window horizon
    /// (`spec.md` §4.3).
    ///
    /// The cell at relative time `window_size` is reserved too, not just
    /// up to `window_size - 1`: when a plan continues past the window
    /// horizon, that cell is exactly the one `stitch_window_slice` hands
    /// back as the agent's next-window start, and it must already be held
    /// by this round's agent before a later-scheduled agent in the same
    /// round searches — otherwise two agents can independently settle on
    /// the same cell as their own next start and collide one window later
    /// (`spec.md` §4.5(3)).
    ///
    /// `plan` must be non-empty; an empty plan has nothing to commit and is
    /// the caller's signal that the agent made no progress this window.
    pub fn commit_plan(&mut self, plan: &[TimedCell], agent: usize, window_size: u32) {
        if plan.is_empty() {
            return;
        }
        let last_in_window = (plan.len() as u32 - 1).min(window_size);
        for step in &plan[..=last_in_window as usize] {
            self.reserve(step.cell(), step.t, agent);
        }

        let plan_end_index = plan.len() as u32 - 1;
        if plan_end_index < window_size {
            // The agent stopped before the window horizon: tail-reserve its
            // resting cell through the rest of the window so no
            // later-scheduled agent walks through it.
            let resting = plan[plan.len() - 1].cell();
            for t in (plan_end_index + 1)..=window_size {
                self.reserve(resting, t, agent);
            }
        }
    }
}
