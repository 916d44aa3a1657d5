//! Lodestar Search: generic state-space search over a user-defined problem.
//!
//! A caller implements [`Problem`](contract::Problem) (initial state,
//! successors, goal test, optional heuristic and value) and picks an
//! algorithm. Nothing here knows anything about the domain.
//!
//! # Layers
//!
//! ```text
//! contract  ←  node  ←  fringe  ←  search   (uninformed / informed / beam)
//!                 ↑                   ↑
//!             tiebreak  ←  local      policy, monitor, stats
//!                          schedule
//! ```
//!
//! # Key types
//!
//! - [`SearchNode`](node::SearchNode): immutable node with parent link, depth and cost
//! - [`Fringe`](fringe::Fringe): FIFO, LIFO, or bounded priority container
//! - [`SearchPolicy`](policy::SearchPolicy): fringe kind, ordering, graph mode, depth limit
//! - [`SearchMonitor`](monitor::SearchMonitor): caller hook that may stop a search
//! - [`SearchStats`](stats::SearchStats): counters with a canonical JSON form

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod fringe;
pub mod local;
pub mod monitor;
pub mod node;
pub mod policy;
pub mod schedule;
pub mod search;
pub mod stats;
pub mod tiebreak;

pub use contract::{Problem, Successor};
pub use error::SearchError;
pub use local::{
    hill_climbing_basic, hill_climbing_first_choice, hill_climbing_stochastic,
    simulated_annealing,
};
pub use node::{NodeOrdering, NodeRef, SearchNode};
pub use schedule::{ExpSchedule, Schedule};
pub use search::{
    astar_search, beam_search, breadth_first_search, depth_first_search, greedy_search,
    iterative_limited_depth_first_search, limited_depth_first_search, uniform_cost_search,
};
