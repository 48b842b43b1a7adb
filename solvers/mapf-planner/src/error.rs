use mapf_core::ConfigError;
use thiserror::Error;

/// Errors a cooperative planner can raise.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Windowed v2 does not silently accept an unreachable agent: the
    /// first agent whose space-time search returns no path aborts the
    /// whole call (`spec.md` §7).
    #[error("agent {agent} has no reachable space-time path to its goal")]
    UnreachableAgent { agent: usize },
}
