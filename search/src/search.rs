//! Fringe-driven traversal and the systematic search entry points.
//!
//! One loop ([`traverse`]) implements breadth-first, depth-first,
//! depth-limited, uniform-cost, greedy, A* and beam search. The strategies
//! differ only in the fringe container, the node ordering, and the
//! graph/tree and depth-limit settings carried by [`SearchPolicy`].

use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::contract::Problem;
use crate::error::SearchError;
use crate::fringe::{BoundedPriorityFringe, FifoFringe, Fringe, HeapFringe, StackFringe};
use crate::monitor::{NoOpMonitor, SearchCommand, SearchMonitor};
use crate::node::{NodeRef, SearchNode};
use crate::policy::{FringeKind, SearchPolicy};
use crate::stats::{SearchStats, TerminationReason};

/// Result of a traversal.
///
/// `goal` is `None` when the fringe emptied or a monitor stopped the search;
/// inspect `stats.termination_reason` to tell which.
#[derive(Debug)]
pub struct SearchResult<S, A> {
    /// The goal node (if found).
    pub goal: Option<Rc<SearchNode<S, A>>>,
    /// Counters and outcome.
    pub stats: SearchStats,
}

impl<S, A> SearchResult<S, A> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.stats.termination_reason,
            TerminationReason::GoalReached { .. }
        )
    }
}

/// Run the generic traversal over an caller-supplied fringe.
///
/// The root is pushed, then nodes are popped until one passes the goal test
/// or the fringe empties. A popped node is expanded unless it sits at the
/// policy's depth limit. In graph-search mode a child is admitted only if
/// its state has not been seen as a child before in this call.
///
/// `policy.fringe` is recorded in the stats but not consulted: the fringe
/// actually used is `fringe`.
///
/// # Errors
///
/// Returns [`SearchError`] for an invalid policy or when the problem breaks
/// its contract (missing heuristic/value, or a NaN score or step cost).
pub fn traverse<P, F, M>(
    problem: &P,
    fringe: &mut F,
    policy: &SearchPolicy,
    monitor: &mut M,
) -> Result<SearchResult<P::State, P::Action>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
    F: Fringe<P::State, P::Action>,
    M: SearchMonitor<P::State, P::Action>,
{
    policy.validate()?;

    let mut stats = SearchStats::new(
        policy.fringe,
        policy.ordering,
        policy.graph_search,
        policy.depth_limit,
    );
    let mut visited: HashSet<P::State> = HashSet::new();

    fringe.push(SearchNode::root(problem, policy.ordering)?);
    monitor.on_enter_search();
    log::debug!(
        "traversal start: fringe={} ordering={} graph_search={} depth_limit={:?}",
        policy.fringe.as_str(),
        policy.ordering.as_str(),
        policy.graph_search,
        policy.depth_limit
    );

    let mut goal = None;
    loop {
        if let SearchCommand::Stop { reason } = monitor.search_command() {
            log::debug!("monitor {} stopped traversal: {reason}", monitor.name());
            stats.termination_reason = TerminationReason::MonitorTerminated { reason };
            break;
        }

        let Some(node) = fringe.pop() else {
            stats.termination_reason = TerminationReason::FringeExhausted;
            break;
        };

        if problem.is_goal(&node.state) {
            stats.termination_reason = TerminationReason::GoalReached { depth: node.depth };
            stats.goal_cost = Some(node.cost);
            goal = Some(node);
            break;
        }

        if policy.depth_limit.is_some_and(|limit| node.depth >= limit) {
            stats.depth_cutoffs += 1;
            continue;
        }

        monitor.on_expand(&node);
        stats.expansions += 1;
        let children = node.expand(problem, policy.ordering)?;
        log::trace!(
            "expanded depth={} cost={} children={}",
            node.depth,
            node.cost,
            children.len()
        );

        for child in children {
            stats.nodes_generated += 1;
            if policy.graph_search && !visited.insert(child.state.clone()) {
                stats.duplicates_suppressed += 1;
                continue;
            }
            fringe.push(child);
        }
    }

    stats.fringe_high_water = fringe.high_water() as u64;
    stats.fringe_dropped = fringe.dropped();
    monitor.on_exit_search();
    log::debug!(
        "traversal end: {:?} expansions={} generated={} duplicates={} high_water={}",
        stats.termination_reason,
        stats.expansions,
        stats.nodes_generated,
        stats.duplicates_suppressed,
        stats.fringe_high_water
    );

    Ok(SearchResult { goal, stats })
}

/// Build the fringe named by `policy` and run [`traverse`] over it.
///
/// # Errors
///
/// Same as [`traverse`].
pub fn search_with_policy<P, M>(
    problem: &P,
    policy: &SearchPolicy,
    monitor: &mut M,
) -> Result<SearchResult<P::State, P::Action>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
    M: SearchMonitor<P::State, P::Action>,
{
    policy.validate()?;
    match policy.fringe {
        FringeKind::Fifo => traverse(problem, &mut FifoFringe::new(), policy, monitor),
        FringeKind::Stack => traverse(problem, &mut StackFringe::new(), policy, monitor),
        // Minimizing orderings break ties FIFO, which the heap does in O(log n).
        FringeKind::Priority { capacity: None } if !policy.ordering.maximizes() => {
            traverse(problem, &mut HeapFringe::new(policy.ordering), policy, monitor)
        }
        FringeKind::Priority { capacity } => {
            let fringe = match capacity {
                Some(capacity) => BoundedPriorityFringe::bounded(policy.ordering, capacity),
                None => BoundedPriorityFringe::unbounded(policy.ordering),
            };
            let mut fringe = match policy.seed {
                Some(seed) => fringe.with_rng(ChaCha8Rng::seed_from_u64(seed)),
                None => fringe,
            };
            traverse(problem, &mut fringe, policy, monitor)
        }
    }
}

fn goal_of<P>(problem: &P, policy: &SearchPolicy) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    search_with_policy(problem, policy, &mut NoOpMonitor).map(|r| r.goal)
}

/// Breadth-first search (FIFO fringe).
///
/// # Errors
///
/// Returns [`SearchError`] if the problem breaks its contract.
pub fn breadth_first_search<P>(
    problem: &P,
    graph_search: bool,
) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    goal_of(problem, &SearchPolicy::breadth_first(graph_search))
}

/// Depth-first search (stack fringe). May not terminate on infinite or
/// cyclic spaces in tree mode.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem breaks its contract.
pub fn depth_first_search<P>(
    problem: &P,
    graph_search: bool,
) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    goal_of(problem, &SearchPolicy::depth_first(graph_search))
}

/// Depth-first search that does not expand nodes at `depth_limit`.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem breaks its contract.
pub fn limited_depth_first_search<P>(
    problem: &P,
    depth_limit: u32,
    graph_search: bool,
) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    goal_of(
        problem,
        &SearchPolicy::depth_limited(depth_limit, graph_search),
    )
}

/// Iterative deepening: depth-limited search with limits 0, 1, 2, …
///
/// Stops at the first pass that returns a goal.
///
/// This departs from the textbook driver, which keeps raising the limit
/// forever when no goal is reachable. Here a pass that exhausts its fringe
/// without cutting off any node has seen the whole reachable space, and the
/// driver returns `None`. On an infinite space without a reachable goal it
/// still never returns; use [`iterative_deepening_search`] with a monitor
/// to bound it.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem breaks its contract.
pub fn iterative_limited_depth_first_search<P>(
    problem: &P,
    graph_search: bool,
) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    iterative_deepening_search(problem, graph_search, &mut NoOpMonitor).map(|r| r.goal)
}

/// Iterative deepening with a caller-supplied monitor.
///
/// The same monitor observes every pass. A pass stopped by the monitor ends
/// the whole driver. The returned stats sum the counters of all passes.
///
/// Unlike the textbook driver, a pass with zero depth cutoffs ends the run
/// with no goal, since a deeper limit cannot reach anything new.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem breaks its contract.
pub fn iterative_deepening_search<P, M>(
    problem: &P,
    graph_search: bool,
    monitor: &mut M,
) -> Result<SearchResult<P::State, P::Action>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
    M: SearchMonitor<P::State, P::Action>,
{
    let mut total: Option<SearchStats> = None;
    let mut limit = 0u32;
    loop {
        let policy = SearchPolicy::depth_limited(limit, graph_search);
        let pass = search_with_policy(problem, &policy, monitor)?;
        let saw_whole_space = pass.stats.depth_cutoffs == 0;
        let stats = match total.take() {
            Some(mut so_far) => {
                so_far.absorb(pass.stats);
                so_far
            }
            None => pass.stats,
        };

        let exhausted = stats.termination_reason == TerminationReason::FringeExhausted;
        if pass.goal.is_some() || !exhausted || saw_whole_space {
            log::debug!(
                "iterative deepening finished after {} passes at limit {limit}",
                stats.passes
            );
            return Ok(SearchResult {
                goal: pass.goal,
                stats,
            });
        }

        total = Some(stats);
        limit += 1;
    }
}

/// Uniform-cost search: lowest accumulated cost first.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem breaks its contract.
pub fn uniform_cost_search<P>(
    problem: &P,
    graph_search: bool,
) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    goal_of(problem, &SearchPolicy::uniform_cost(graph_search))
}

/// Greedy best-first search: lowest heuristic first.
///
/// # Errors
///
/// Returns [`SearchError::MissingHeuristic`] if the problem has no
/// heuristic, or another [`SearchError`] on a contract violation.
pub fn greedy_search<P>(
    problem: &P,
    graph_search: bool,
) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    goal_of(problem, &SearchPolicy::greedy(graph_search))
}

/// A* search: lowest `cost + heuristic` first.
///
/// # Errors
///
/// Returns [`SearchError::MissingHeuristic`] if the problem has no
/// heuristic, or another [`SearchError`] on a contract violation.
pub fn astar_search<P>(problem: &P, graph_search: bool) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    goal_of(problem, &SearchPolicy::astar(graph_search))
}

/// Beam search: keep only the `beam_width` highest-value nodes pending.
///
/// Equal values are popped in random order drawn from system entropy; use
/// [`beam_search_with_rng`] for reproducible runs.
///
/// # Errors
///
/// Returns [`SearchError::InvalidBeamWidth`] for a zero width and
/// [`SearchError::MissingValue`] if the problem has no value function.
pub fn beam_search<P>(problem: &P, beam_width: usize) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    goal_of(problem, &SearchPolicy::beam(beam_width))
}

/// [`beam_search`] with tie-breaking seeded from `rng`.
///
/// # Errors
///
/// Same as [`beam_search`].
pub fn beam_search_with_rng<P, R>(
    problem: &P,
    beam_width: usize,
    rng: &mut R,
) -> Result<Option<NodeRef<P>>, SearchError>
where
    P: Problem,
    P::State: Eq + Hash,
    R: Rng + ?Sized,
{
    goal_of(problem, &SearchPolicy::beam(beam_width).with_seed(rng.gen()))
}
