//! Problem contract trait.

/// One outgoing edge reported by [`Problem::successors`].
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    /// Edge label recorded on the child node.
    pub action: A,
    /// The state reached by taking `action`.
    pub state: S,
    /// Cost of this single step. Must not be NaN. Uniform-cost and A*
    /// return cheapest paths only when every step cost is non-negative.
    pub step_cost: f64,
}

impl<S, A> Successor<S, A> {
    /// Construct a successor with an explicit step cost.
    #[must_use]
    pub fn new(action: A, state: S, step_cost: f64) -> Self {
        Self {
            action,
            state,
            step_cost,
        }
    }

    /// Construct a successor for an unweighted domain (step cost 1).
    #[must_use]
    pub fn unit(action: A, state: S) -> Self {
        Self::new(action, state, 1.0)
    }
}

/// Trait for problems that can be searched.
///
/// # Contract
///
/// - `successors` must be deterministic for a given state if reproducible
///   runs are expected; the engine never reorders what it returns.
/// - `heuristic` is consulted only by greedy and A* search. A problem that
///   returns `None` there fails those strategies with
///   [`SearchError::MissingHeuristic`](crate::error::SearchError::MissingHeuristic).
/// - `value` is consulted only by beam search and local search; higher is
///   better. Returning `None` fails those strategies with
///   [`SearchError::MissingValue`](crate::error::SearchError::MissingValue).
/// - The fringe-driven traversals additionally require `State: Eq + Hash`
///   so graph search can keep a visited set. Local search does not.
pub trait Problem {
    /// Opaque state representation.
    type State: Clone + PartialEq + std::fmt::Debug;
    /// Edge label.
    type Action: Clone + std::fmt::Debug;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Enumerate every `(action, next_state, step_cost)` reachable from `state`.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Test whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Estimated remaining cost from `state` to the nearest goal.
    fn heuristic(&self, _state: &Self::State) -> Option<f64> {
        None
    }

    /// Desirability of `state` (higher is better).
    fn value(&self, _state: &Self::State) -> Option<f64> {
        None
    }
}

