//! Local search: hill climbing variants and simulated annealing.
//!
//! These walk a single current node instead of draining a fringe. Each step
//! expands the current node and picks a neighbor according to the variant's
//! policy. Nodes are built under [`NodeOrdering::Value`], so a problem
//! without a value function fails on the root with
//! [`SearchError::MissingValue`].

use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::contract::Problem;
use crate::error::SearchError;
use crate::monitor::{NoOpMonitor, SearchCommand, SearchMonitor};
use crate::node::{NodeOrdering, NodeRef, SearchNode};
use crate::schedule::Schedule;
use crate::stats::{LocalSearchStats, LocalTermination};
use crate::tiebreak::select_max_index_random_tie;

/// How hill climbing picks the next node among the current node's neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborSelection {
    /// Highest-value neighbor (random among ties), accepted if its value is
    /// no lower than the current value. Plateau moves are allowed.
    Best,
    /// A uniformly random neighbor among those strictly better than current.
    Stochastic,
    /// The first strictly better neighbor in a shuffled scan.
    FirstChoice,
}

impl NeighborSelection {
    /// Short lowercase name, used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Stochastic => "stochastic",
            Self::FirstChoice => "first_choice",
        }
    }
}

/// Result of a local search run. There is always a node: at worst the root.
#[derive(Debug)]
pub struct LocalSearchResult<S, A> {
    /// The node the search stopped at.
    pub node: Rc<SearchNode<S, A>>,
    /// Counters and outcome.
    pub stats: LocalSearchStats,
}

/// Value of a node built under value ordering.
fn value_of<S, A>(node: &SearchNode<S, A>) -> f64 {
    // Always `Some` for nodes built under NodeOrdering::Value.
    node.value.unwrap_or(f64::NEG_INFINITY)
}

fn select_neighbor<S, A, R>(
    selection: NeighborSelection,
    neighbors: &[Rc<SearchNode<S, A>>],
    current_value: f64,
    rng: &mut R,
) -> Option<usize>
where
    R: Rng + ?Sized,
{
    match selection {
        NeighborSelection::Best => {
            let best = select_max_index_random_tie(neighbors, |n| value_of(n), rng)?;
            (value_of(&neighbors[best]) >= current_value).then_some(best)
        }
        NeighborSelection::Stochastic => {
            let uphill: Vec<usize> = neighbors
                .iter()
                .enumerate()
                .filter(|(_, n)| value_of(n) > current_value)
                .map(|(i, _)| i)
                .collect();
            uphill.choose(rng).copied()
        }
        NeighborSelection::FirstChoice => {
            let mut order: Vec<usize> = (0..neighbors.len()).collect();
            order.shuffle(rng);
            order
                .into_iter()
                .find(|&i| value_of(&neighbors[i]) > current_value)
        }
    }
}

/// Generic hill climbing with an explicit selection policy, RNG and monitor.
///
/// Stops when the current node has no neighbors, when the policy finds no
/// acceptable neighbor, or when the monitor says so. [`NeighborSelection::Best`]
/// accepts equal-value moves and can walk a plateau indefinitely; bound it
/// with a monitor if the problem has plateaus with cycles.
///
/// # Errors
///
/// Returns [`SearchError::MissingValue`] or [`SearchError::NanScore`]
/// if the problem's value function breaks its contract.
pub fn hill_climbing_search<P, R, M>(
    problem: &P,
    selection: NeighborSelection,
    rng: &mut R,
    monitor: &mut M,
) -> Result<LocalSearchResult<P::State, P::Action>, SearchError>
where
    P: Problem,
    R: Rng + ?Sized,
    M: SearchMonitor<P::State, P::Action>,
{
    let mut current = SearchNode::root(problem, NodeOrdering::Value)?;
    let mut steps = 0u64;
    let mut moves = 0u64;
    monitor.on_enter_search();

    let termination = loop {
        if let SearchCommand::Stop { reason } = monitor.search_command() {
            break LocalTermination::MonitorTerminated { reason };
        }
        monitor.on_expand(&current);
        let mut neighbors = current.expand(problem, NodeOrdering::Value)?;
        steps += 1;
        if neighbors.is_empty() {
            break LocalTermination::NoNeighbors;
        }
        let current_value = value_of(&current);
        let Some(next) = select_neighbor(selection, &neighbors, current_value, rng) else {
            break LocalTermination::NoImprovingNeighbor;
        };
        current = neighbors.swap_remove(next);
        moves += 1;
        log::trace!(
            "hill climbing ({}) moved {current_value} -> {}",
            selection.as_str(),
            value_of(&current)
        );
    };

    monitor.on_exit_search();
    let stats = LocalSearchStats {
        steps,
        moves,
        final_value: value_of(&current),
        termination,
    };
    log::debug!(
        "hill climbing ({}) finished: {:?} after {steps} steps, value {}",
        selection.as_str(),
        stats.termination,
        stats.final_value
    );
    Ok(LocalSearchResult {
        node: current,
        stats,
    })
}

/// Best-neighbor hill climbing with plateau tolerance.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem's value function breaks its contract.
pub fn hill_climbing_basic<P: Problem>(problem: &P) -> Result<NodeRef<P>, SearchError> {
    hill_climbing_basic_with_rng(problem, &mut ChaCha8Rng::from_entropy())
}

/// [`hill_climbing_basic`] with a caller-supplied RNG for tie-breaking.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem's value function breaks its contract.
pub fn hill_climbing_basic_with_rng<P, R>(problem: &P, rng: &mut R) -> Result<NodeRef<P>, SearchError>
where
    P: Problem,
    R: Rng + ?Sized,
{
    hill_climbing_search(problem, NeighborSelection::Best, rng, &mut NoOpMonitor).map(|r| r.node)
}

/// Stochastic hill climbing: a random strictly better neighbor each step.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem's value function breaks its contract.
pub fn hill_climbing_stochastic<P: Problem>(problem: &P) -> Result<NodeRef<P>, SearchError> {
    hill_climbing_stochastic_with_rng(problem, &mut ChaCha8Rng::from_entropy())
}

/// [`hill_climbing_stochastic`] with a caller-supplied RNG.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem's value function breaks its contract.
pub fn hill_climbing_stochastic_with_rng<P, R>(
    problem: &P,
    rng: &mut R,
) -> Result<NodeRef<P>, SearchError>
where
    P: Problem,
    R: Rng + ?Sized,
{
    hill_climbing_search(problem, NeighborSelection::Stochastic, rng, &mut NoOpMonitor)
        .map(|r| r.node)
}

/// First-choice hill climbing: the first strictly better neighbor found in a
/// shuffled scan.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem's value function breaks its contract.
pub fn hill_climbing_first_choice<P: Problem>(problem: &P) -> Result<NodeRef<P>, SearchError> {
    hill_climbing_first_choice_with_rng(problem, &mut ChaCha8Rng::from_entropy())
}

/// [`hill_climbing_first_choice`] with a caller-supplied RNG.
///
/// # Errors
///
/// Returns [`SearchError`] if the problem's value function breaks its contract.
pub fn hill_climbing_first_choice_with_rng<P, R>(
    problem: &P,
    rng: &mut R,
) -> Result<NodeRef<P>, SearchError>
where
    P: Problem,
    R: Rng + ?Sized,
{
    hill_climbing_search(problem, NeighborSelection::FirstChoice, rng, &mut NoOpMonitor)
        .map(|r| r.node)
}

/// Simulated annealing with an explicit RNG and monitor.
///
/// At step `t` the temperature is `schedule.temperature(t)`. Zero ends the
/// run. Otherwise a uniformly random neighbor is drawn and accepted if it is
/// better, or with probability `exp(delta / T)` if it is not.
///
/// # Errors
///
/// Returns [`SearchError::InvalidSchedule`] for a negative or NaN
/// temperature, and [`SearchError::MissingValue`] or
/// [`SearchError::NanScore`] if the value function breaks its contract.
pub fn annealing_search<P, C, R, M>(
    problem: &P,
    schedule: &C,
    rng: &mut R,
    monitor: &mut M,
) -> Result<LocalSearchResult<P::State, P::Action>, SearchError>
where
    P: Problem,
    C: Schedule + ?Sized,
    R: Rng + ?Sized,
    M: SearchMonitor<P::State, P::Action>,
{
    let mut current = SearchNode::root(problem, NodeOrdering::Value)?;
    let mut steps = 0u64;
    let mut moves = 0u64;
    monitor.on_enter_search();

    let mut t = 0u64;
    let termination = loop {
        if let SearchCommand::Stop { reason } = monitor.search_command() {
            break LocalTermination::MonitorTerminated { reason };
        }
        let temperature = schedule.temperature(t);
        if temperature.is_nan() || temperature < 0.0 {
            return Err(SearchError::InvalidSchedule {
                step: t,
                temperature,
            });
        }
        if temperature == 0.0 {
            break LocalTermination::Frozen { step: t };
        }

        monitor.on_expand(&current);
        let mut neighbors = current.expand(problem, NodeOrdering::Value)?;
        steps += 1;
        if neighbors.is_empty() {
            break LocalTermination::NoNeighbors;
        }

        let pick = rng.gen_range(0..neighbors.len());
        let delta = value_of(&neighbors[pick]) - value_of(&current);
        if delta > 0.0 || rng.gen::<f64>() < (delta / temperature).exp() {
            current = neighbors.swap_remove(pick);
            moves += 1;
            log::trace!("annealing t={t} T={temperature:.4} accepted delta={delta}");
        }
        t += 1;
    };

    monitor.on_exit_search();
    let stats = LocalSearchStats {
        steps,
        moves,
        final_value: value_of(&current),
        termination,
    };
    log::debug!(
        "annealing finished: {:?} after {steps} steps ({moves} moves), value {}",
        stats.termination,
        stats.final_value
    );
    Ok(LocalSearchResult {
        node: current,
        stats,
    })
}

/// Simulated annealing. Pass `&ExpSchedule::default()` for the standard
/// schedule (k = 20, lambda = 0.005, limit = 100).
///
/// # Errors
///
/// Same as [`annealing_search`].
pub fn simulated_annealing<P, C>(problem: &P, schedule: &C) -> Result<NodeRef<P>, SearchError>
where
    P: Problem,
    C: Schedule + ?Sized,
{
    simulated_annealing_with_rng(problem, schedule, &mut ChaCha8Rng::from_entropy())
}

/// [`simulated_annealing`] with a caller-supplied RNG.
///
/// # Errors
///
/// Same as [`annealing_search`].
pub fn simulated_annealing_with_rng<P, C, R>(
    problem: &P,
    schedule: &C,
    rng: &mut R,
) -> Result<NodeRef<P>, SearchError>
where
    P: Problem,
    C: Schedule + ?Sized,
    R: Rng + ?Sized,
{
    annealing_search(problem, schedule, rng, &mut NoOpMonitor).map(|r| r.node)
}
