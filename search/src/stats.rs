//! Search statistics and their JSON rendering.
//!
//! Every traversal and local search returns a stats record alongside its
//! node. The JSON form uses sorted keys and compact separators so two runs
//! with the same seed produce identical bytes.

use crate::node::NodeOrdering;
use crate::policy::FringeKind;

/// Why a fringe-driven traversal stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// A popped node passed the goal test.
    GoalReached { depth: u32 },
    /// The fringe emptied without reaching a goal.
    FringeExhausted,
    /// A monitor asked the search to stop.
    MonitorTerminated { reason: String },
}

/// Counters and configuration echo for one traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    // Policy echo
    pub fringe: FringeKind,
    pub ordering: NodeOrdering,
    pub graph_search: bool,
    pub depth_limit: Option<u32>,

    // Counters
    /// Nodes popped and expanded.
    pub expansions: u64,
    /// Child nodes created by expansion.
    pub nodes_generated: u64,
    /// Children rejected because their state was already visited.
    pub duplicates_suppressed: u64,
    /// Popped nodes not expanded because they sat at the depth limit.
    pub depth_cutoffs: u64,
    /// Nodes discarded by a bounded fringe.
    pub fringe_dropped: u64,
    pub fringe_high_water: u64,
    /// Depth-limited passes run (1 for everything except iterative deepening).
    pub passes: u32,

    /// Path cost of the returned goal, if any.
    pub goal_cost: Option<f64>,
    pub termination_reason: TerminationReason,
}

impl SearchStats {
    /// Zeroed stats for a traversal about to run under the given policy.
    #[must_use]
    pub fn new(
        fringe: FringeKind,
        ordering: NodeOrdering,
        graph_search: bool,
        depth_limit: Option<u32>,
    ) -> Self {
        Self {
            fringe,
            ordering,
            graph_search,
            depth_limit,
            expansions: 0,
            nodes_generated: 0,
            duplicates_suppressed: 0,
            depth_cutoffs: 0,
            fringe_dropped: 0,
            fringe_high_water: 0,
            passes: 1,
            goal_cost: None,
            termination_reason: TerminationReason::FringeExhausted,
        }
    }

    /// Fold the counters of a later pass into this record.
    ///
    /// Counters add up, the high-water mark keeps the maximum, and the
    /// policy echo and outcome are taken from `later`.
    pub fn absorb(&mut self, later: SearchStats) {
        self.expansions += later.expansions;
        self.nodes_generated += later.nodes_generated;
        self.duplicates_suppressed += later.duplicates_suppressed;
        self.depth_cutoffs += later.depth_cutoffs;
        self.fringe_dropped += later.fringe_dropped;
        self.fringe_high_water = self.fringe_high_water.max(later.fringe_high_water);
        self.passes += later.passes;
        self.depth_limit = later.depth_limit;
        self.goal_cost = later.goal_cost;
        self.termination_reason = later.termination_reason;
    }

    /// Convert to a `serde_json::Value`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let fringe_capacity = match self.fringe {
            FringeKind::Priority { capacity } => capacity,
            FringeKind::Fifo | FringeKind::Stack => None,
        };
        serde_json::json!({
            "depth_cutoffs": self.depth_cutoffs,
            "depth_limit": self.depth_limit,
            "duplicates_suppressed": self.duplicates_suppressed,
            "expansions": self.expansions,
            "fringe": self.fringe.as_str(),
            "fringe_capacity": fringe_capacity,
            "fringe_dropped": self.fringe_dropped,
            "fringe_high_water": self.fringe_high_water,
            "goal_cost": self.goal_cost,
            "graph_search": self.graph_search,
            "nodes_generated": self.nodes_generated,
            "ordering": self.ordering.as_str(),
            "passes": self.passes,
            "termination_reason": termination_reason_to_json(&self.termination_reason),
        })
    }

    /// Serialize to compact JSON bytes with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json::Error` if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_json_value())
    }
}

fn termination_reason_to_json(r: &TerminationReason) -> serde_json::Value {
    match r {
        TerminationReason::GoalReached { depth } => {
            serde_json::json!({"depth": depth, "type": "goal_reached"})
        }
        TerminationReason::FringeExhausted => serde_json::json!({"type": "fringe_exhausted"}),
        TerminationReason::MonitorTerminated { reason } => {
            serde_json::json!({"reason": reason, "type": "monitor_terminated"})
        }
    }
}

/// Why a local search stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalTermination {
    /// The current node has no successors.
    NoNeighbors,
    /// The selection policy found no acceptable neighbor.
    NoImprovingNeighbor,
    /// The cooling schedule reached zero temperature at `step`.
    Frozen { step: u64 },
    /// A monitor asked the search to stop.
    MonitorTerminated { reason: String },
}

/// Counters for one local search run.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchStats {
    /// Iterations that expanded the current node.
    pub steps: u64,
    /// Iterations that replaced the current node.
    pub moves: u64,
    /// Value of the returned node.
    pub final_value: f64,
    pub termination: LocalTermination,
}

impl LocalSearchStats {
    /// Convert to a `serde_json::Value`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let termination = match &self.termination {
            LocalTermination::NoNeighbors => serde_json::json!({"type": "no_neighbors"}),
            LocalTermination::NoImprovingNeighbor => {
                serde_json::json!({"type": "no_improving_neighbor"})
            }
            LocalTermination::Frozen { step } => {
                serde_json::json!({"step": step, "type": "frozen"})
            }
            LocalTermination::MonitorTerminated { reason } => {
                serde_json::json!({"reason": reason, "type": "monitor_terminated"})
            }
        };
        serde_json::json!({
            "final_value": self.final_value,
            "moves": self.moves,
            "steps": self.steps,
            "termination": termination,
        })
    }
}
