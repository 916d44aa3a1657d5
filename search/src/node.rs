//! Core search node and node ordering types.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::contract::{Problem, Successor};
use crate::error::{ScoreKind, SearchError};

/// Shared handle to a node of problem `P`.
pub type NodeRef<P> = Rc<SearchNode<<P as Problem>::State, <P as Problem>::Action>>;

/// An immutable search node.
///
/// Nodes are created by [`SearchNode::root`] or [`SearchNode::expand`] and
/// never mutated afterwards, so a parent can be shared by any number of
/// children and fringe entries through `Rc`.
pub struct SearchNode<S, A> {
    /// The problem state at this node.
    pub state: S,
    /// The node this one was expanded from (`None` for root).
    pub parent: Option<Rc<SearchNode<S, A>>>,
    /// The action that produced this node from its parent (`None` for root).
    pub action: Option<A>,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Accumulated path cost from the root (root = 0).
    pub cost: f64,
    /// Heuristic estimate, filled for heuristic and star ordering.
    pub heuristic: Option<f64>,
    /// Problem value, filled for value ordering.
    pub value: Option<f64>,
}

impl<S, A> SearchNode<S, A>
where
    S: Clone + PartialEq + std::fmt::Debug,
    A: Clone + std::fmt::Debug,
{
    /// Build the root node from the problem's initial state.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingHeuristic`], [`SearchError::MissingValue`]
    /// or [`SearchError::NanScore`] if `ordering` needs a score the
    /// problem cannot provide.
    pub fn root<P>(problem: &P, ordering: NodeOrdering) -> Result<Rc<Self>, SearchError>
    where
        P: Problem<State = S, Action = A>,
    {
        let state = problem.initial_state();
        let (heuristic, value) = annotate(problem, &state, ordering)?;
        Ok(Rc::new(Self {
            state,
            parent: None,
            action: None,
            depth: 0,
            cost: 0.0,
            heuristic,
            value,
        }))
    }

    /// Expand this node into one child per successor the problem reports.
    ///
    /// Children keep the problem's enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NanScore`] for a NaN step cost, and the same
    /// annotation errors as [`SearchNode::root`]. Negative and infinite step
    /// costs are accepted; cost-ordered strategies are only optimal when
    /// every step cost is non-negative.
    pub fn expand<P>(
        self: &Rc<Self>,
        problem: &P,
        ordering: NodeOrdering,
    ) -> Result<Vec<Rc<Self>>, SearchError>
    where
        P: Problem<State = S, Action = A>,
    {
        problem
            .successors(&self.state)
            .into_iter()
            .map(|successor| self.child(problem, ordering, successor))
            .collect()
    }

    fn child<P>(
        self: &Rc<Self>,
        problem: &P,
        ordering: NodeOrdering,
        successor: Successor<S, A>,
    ) -> Result<Rc<Self>, SearchError>
    where
        P: Problem<State = S, Action = A>,
    {
        let Successor {
            action,
            state,
            step_cost,
        } = successor;
        let step_cost = not_nan(step_cost, ScoreKind::StepCost, &state)?;
        let (heuristic, value) = annotate(problem, &state, ordering)?;
        Ok(Rc::new(Self {
            state,
            parent: Some(Rc::clone(self)),
            action: Some(action),
            depth: self.depth + 1,
            cost: self.cost + step_cost,
            heuristic,
            value,
        }))
    }
}

impl<S, A> SearchNode<S, A> {
    /// `cost + heuristic`, the A* ordering key. `None` without a heuristic.
    #[must_use]
    pub fn f_cost(&self) -> Option<f64> {
        self.heuristic.map(|h| self.cost + h)
    }

    /// Iterate from this node up to the root.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'_, S, A> {
        Ancestors { next: Some(self) }
    }

    /// Nodes from the root down to this node.
    #[must_use]
    pub fn path(&self) -> Vec<&Self> {
        let mut path: Vec<&Self> = self.ancestors().collect();
        path.reverse();
        path
    }

    /// States from the root down to this node.
    #[must_use]
    pub fn states(&self) -> Vec<&S> {
        self.path().into_iter().map(|n| &n.state).collect()
    }

    /// Actions taken from the root to reach this node.
    #[must_use]
    pub fn actions(&self) -> Vec<&A> {
        self.path()
            .into_iter()
            .filter_map(|n| n.action.as_ref())
            .collect()
    }
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a, S, A> {
    next: Option<&'a SearchNode<S, A>>,
}

impl<'a, S, A> Iterator for Ancestors<'a, S, A> {
    type Item = &'a SearchNode<S, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

impl<S, A> Drop for SearchNode<S, A> {
    // Unlink long ancestor chains iteratively instead of recursing per level.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl<S: std::fmt::Debug, A: std::fmt::Debug> std::fmt::Debug for SearchNode<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchNode")
            .field("state", &self.state)
            .field("action", &self.action)
            .field("depth", &self.depth)
            .field("cost", &self.cost)
            .field("heuristic", &self.heuristic)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Which key the fringe orders nodes by.
///
/// The node shape is the same for every variant; only the comparator and
/// the scores computed at construction differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeOrdering {
    /// No key. Used by FIFO and stack fringes.
    #[default]
    Insertion,
    /// Lowest accumulated `cost` first (uniform-cost search).
    Cost,
    /// Lowest `heuristic` first (greedy search).
    Heuristic,
    /// Lowest `cost + heuristic` first (A*).
    Star,
    /// Highest `value` first (beam search, local search).
    Value,
}

impl NodeOrdering {
    /// Whether nodes under this ordering need `Problem::heuristic`.
    #[must_use]
    pub fn needs_heuristic(self) -> bool {
        matches!(self, Self::Heuristic | Self::Star)
    }

    /// Whether nodes under this ordering need `Problem::value`.
    #[must_use]
    pub fn needs_value(self) -> bool {
        matches!(self, Self::Value)
    }

    /// Whether larger keys are better.
    #[must_use]
    pub fn maximizes(self) -> bool {
        matches!(self, Self::Value)
    }

    /// The ordering key of `node`, or `None` for [`NodeOrdering::Insertion`].
    #[must_use]
    pub fn key<S, A>(self, node: &SearchNode<S, A>) -> Option<f64> {
        match self {
            Self::Insertion => None,
            Self::Cost => Some(node.cost),
            Self::Heuristic => node.heuristic,
            Self::Star => node.f_cost(),
            Self::Value => node.value,
        }
    }

    /// Compare two keys so that the better key sorts first.
    #[must_use]
    pub fn compare_keys(self, a: f64, b: f64) -> Ordering {
        if self.maximizes() {
            b.total_cmp(&a)
        } else {
            a.total_cmp(&b)
        }
    }

    /// Short lowercase name, used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Cost => "cost",
            Self::Heuristic => "heuristic",
            Self::Star => "star",
            Self::Value => "value",
        }
    }
}

/// Compute the heuristic and value fields required by `ordering`.
fn annotate<P: Problem>(
    problem: &P,
    state: &P::State,
    ordering: NodeOrdering,
) -> Result<(Option<f64>, Option<f64>), SearchError> {
    let heuristic = if ordering.needs_heuristic() {
        let h = problem
            .heuristic(state)
            .ok_or_else(|| SearchError::MissingHeuristic {
                state: format!("{state:?}"),
            })?;
        Some(not_nan(h, ScoreKind::Heuristic, state)?)
    } else {
        None
    };
    let value = if ordering.needs_value() {
        Some(node_value(problem, state)?)
    } else {
        None
    };
    Ok((heuristic, value))
}

/// Read `Problem::value` for `state`, rejecting absent or NaN values.
///
/// Infinite values are kept; [`f64::total_cmp`] orders them at the ends.
///
/// # Errors
///
/// Returns [`SearchError::MissingValue`] or [`SearchError::NanScore`].
pub fn node_value<P: Problem>(problem: &P, state: &P::State) -> Result<f64, SearchError> {
    let v = problem
        .value(state)
        .ok_or_else(|| SearchError::MissingValue {
            state: format!("{state:?}"),
        })?;
    not_nan(v, ScoreKind::Value, state)
}

/// Reject NaN. Infinities order fine under `total_cmp` and pass through.
fn not_nan<S: std::fmt::Debug>(raw: f64, kind: ScoreKind, state: &S) -> Result<f64, SearchError> {
    if raw.is_nan() {
        Err(SearchError::NanScore {
            kind,
            raw,
            state: format!("{state:?}"),
        })
    } else {
        Ok(raw)
    }
}
