//! Search policy types.

use crate::error::SearchError;
use crate::node::NodeOrdering;

/// Which fringe container drives the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FringeKind {
    /// First-in, first-out queue.
    Fifo,
    /// Last-in, first-out stack.
    Stack,
    /// Priority queue keyed by the policy's ordering, optionally bounded.
    Priority { capacity: Option<usize> },
}

impl FringeKind {
    /// Short lowercase name, used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Stack => "stack",
            Self::Priority { capacity: None } => "priority",
            Self::Priority { capacity: Some(_) } => "bounded_priority",
        }
    }
}

/// Traversal configuration: fringe shape, ordering, dedup and depth cutoff.
///
/// The named constructors build the policy each strategy uses; they are the
/// only configurations the public entry points run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Fringe container.
    pub fringe: FringeKind,
    /// Node ordering (also decides which scores nodes compute).
    pub ordering: NodeOrdering,
    /// Keep a visited set and admit each state at most once.
    pub graph_search: bool,
    /// Nodes at this depth are not expanded.
    pub depth_limit: Option<u32>,
    /// Seed for tie-breaking in value-ordered fringes. `None` draws from
    /// system entropy.
    pub seed: Option<u64>,
}

impl SearchPolicy {
    #[must_use]
    pub fn breadth_first(graph_search: bool) -> Self {
        Self {
            fringe: FringeKind::Fifo,
            ordering: NodeOrdering::Insertion,
            graph_search,
            depth_limit: None,
            seed: None,
        }
    }

    #[must_use]
    pub fn depth_first(graph_search: bool) -> Self {
        Self {
            fringe: FringeKind::Stack,
            ..Self::breadth_first(graph_search)
        }
    }

    #[must_use]
    pub fn depth_limited(depth_limit: u32, graph_search: bool) -> Self {
        Self {
            depth_limit: Some(depth_limit),
            ..Self::depth_first(graph_search)
        }
    }

    #[must_use]
    pub fn uniform_cost(graph_search: bool) -> Self {
        Self::best_first(NodeOrdering::Cost, graph_search)
    }

    #[must_use]
    pub fn greedy(graph_search: bool) -> Self {
        Self::best_first(NodeOrdering::Heuristic, graph_search)
    }

    #[must_use]
    pub fn astar(graph_search: bool) -> Self {
        Self::best_first(NodeOrdering::Star, graph_search)
    }

    /// Beam search: value-ordered, width-bounded, tree mode.
    #[must_use]
    pub fn beam(beam_width: usize) -> Self {
        Self {
            fringe: FringeKind::Priority {
                capacity: Some(beam_width),
            },
            ordering: NodeOrdering::Value,
            graph_search: false,
            depth_limit: None,
            seed: None,
        }
    }

    fn best_first(ordering: NodeOrdering, graph_search: bool) -> Self {
        Self {
            fringe: FringeKind::Priority { capacity: None },
            ordering,
            graph_search,
            depth_limit: None,
            seed: None,
        }
    }

    /// Set the tie-break seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate that the combination can be executed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBeamWidth`] for a zero-capacity priority
    /// fringe, and [`SearchError::InvalidPolicy`] for a priority fringe with
    /// no ordering key.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let FringeKind::Priority { capacity } = self.fringe {
            if capacity == Some(0) {
                return Err(SearchError::InvalidBeamWidth { width: 0 });
            }
            if self.ordering == NodeOrdering::Insertion {
                return Err(SearchError::InvalidPolicy {
                    detail: "priority fringe requires a cost, heuristic, star or value ordering"
                        .into(),
                });
            }
        }
        Ok(())
    }
}
