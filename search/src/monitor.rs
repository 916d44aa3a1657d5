//! Search monitors: caller-side hooks that observe a search and may stop it.
//!
//! The core algorithms never impose a runtime bound of their own. A caller
//! that needs one (iterative deepening on a goal-less space, plateau walks in
//! hill climbing) passes a monitor such as [`ExpansionLimitMonitor`].

use crate::node::SearchNode;

/// A monitor's verdict, polled before each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    /// Take the next step.
    Continue,
    /// End the search now. The reason is copied into the run's stats.
    Stop { reason: String },
}

impl SearchCommand {
    /// Stop with a reason.
    #[must_use]
    pub fn stop(reason: impl Into<String>) -> Self {
        Self::Stop {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop { .. })
    }
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => f.write_str("continue"),
            Self::Stop { reason } => write!(f, "stop ({reason})"),
        }
    }
}

/// Observer invoked by every traversal and local search.
///
/// `search_command` is polled once per step, before the next node is taken.
pub trait SearchMonitor<S, A> {
    fn name(&self) -> &str;

    fn on_enter_search(&mut self) {}

    /// Called each time a node is about to be expanded.
    fn on_expand(&mut self, _node: &SearchNode<S, A>) {}

    fn on_exit_search(&mut self) {}

    fn search_command(&self) -> SearchCommand;
}

/// Monitor that never interferes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl<S, A> SearchMonitor<S, A> for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

/// Stops the search once `limit` expansions have happened.
///
/// The count is not reset by `on_enter_search`, so one monitor bounds the
/// total work of a driver that runs several passes (iterative deepening).
#[derive(Debug, Clone, Copy)]
pub struct ExpansionLimitMonitor {
    limit: u64,
    expansions: u64,
}

impl ExpansionLimitMonitor {
    #[must_use]
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            expansions: 0,
        }
    }

    #[must_use]
    pub fn expansions(&self) -> u64 {
        self.expansions
    }
}

impl<S, A> SearchMonitor<S, A> for ExpansionLimitMonitor {
    fn name(&self) -> &str {
        "ExpansionLimitMonitor"
    }

    fn on_expand(&mut self, _node: &SearchNode<S, A>) {
        self.expansions += 1;
    }

    fn search_command(&self) -> SearchCommand {
        if self.expansions >= self.limit {
            SearchCommand::stop(format!("expansion limit {} reached", self.limit))
        } else {
            SearchCommand::Continue
        }
    }
}
