//! Shared plumbing for the windowed planners: config validation and
//! window-slice stitching (`spec.md` §4.5, §4.6).

use mapf_core::{Cell, ConfigError, TimedCell};

/// Common entry validation for both windowed variants: non-empty agent
/// list, matching starts/goals length, and a strictly positive window
/// size. Returns the window size as a `u32` once validated.
pub(crate) fn validate(starts_len: usize, goals_len: usize, window_size: i64) -> Result<u32, ConfigError> {
    if starts_len == 0 {
        return Err(ConfigError::EmptyAgentList);
    }
    if starts_len != goals_len {
        return Err(ConfigError::StartGoalLengthMismatch {
            starts: starts_len,
            goals: goals_len,
        });
    }
    if window_size <= 0 {
        return Err(ConfigError::NonPositiveWindowSize(window_size));
    }
    Ok(window_size as u32)
}

/// Append one agent's raw space-time path onto its accumulated output,
/// re-stamping relative time by the offset already accumulated, and
/// return `(next_start, finished)`.
///
/// If `raw` reaches `goal` at or before `window_size` steps, the whole
/// remaining path (including the final resting cell) is appended and the
/// agent is reported finished. Otherwise only the steps up to the window
/// boundary are appended — the boundary cell itself is *not* appended,
/// since it becomes the next window's relative `t = 0` start; it is
/// re-appended (at most once, when the agent eventually finishes) so the
/// final resting cell is never lost (`spec.md` §6's "final cell is the
/// agent's resting position" contract).
///
/// The boundary cell sits at relative time `window_size` — the caller
/// must commit the raw plan to the `ReservationTable` with the same
/// `window_size` *before* calling this function, so that cell is already
/// reserved under the agent's own id by the time it becomes another
/// agent's candidate next start later in the same round.
pub(crate) fn stitch_window_slice(
    accumulated: &mut Vec<TimedCell>,
    raw: &[TimedCell],
    window_size: u32,
    goal: Cell,
) -> (Cell, bool) {
    debug_assert!(!raw.is_empty());
    let offset = accumulated.len() as u32;
    let steps = raw.len() as u32 - 1;
    let boundary = steps.min(window_size);
    let reached_goal_in_window = boundary == steps && raw[steps as usize].cell() == goal;

    if reached_goal_in_window {
        for step in raw {
            accumulated.push(TimedCell::new(step.cell(), offset + step.t));
        }
        (goal, true)
    } else {
        for step in &raw[..boundary as usize] {
            accumulated.push(TimedCell::new(step.cell(), offset + step.t));
        }
        let next_start = raw[boundary as usize].cell();
        (next_start, false)
    }
}
