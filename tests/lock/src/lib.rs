//! Shared fixtures for the lock tests.
//!
//! [`RandomDag`] generates finite acyclic problems from a seed, together with
//! reference answers (cheapest goal cost, shallowest goal depth) computed by
//! plain dynamic programming, independent of the search crate.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lodestar_search::contract::{Problem, Successor};

/// Deterministic RNG for a test case.
#[must_use]
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A random weighted DAG over states `0..n`, rooted at 0.
///
/// Every state `i` has an edge to `i + 1`, so the last state (always a goal)
/// is reachable from the root. Extra edges only point forward, so the space
/// is finite and acyclic even in tree-search mode.
#[derive(Debug, Clone)]
pub struct RandomDag {
    edges: Vec<Vec<(usize, f64)>>,
    goals: Vec<bool>,
    estimates: Vec<f64>,
}

impl RandomDag {
    /// Generate a DAG with `nodes` states (at least 2), up to `extra_edges`
    /// additional forward edges per state, and each non-root state a goal
    /// with probability `goal_chance`. Step costs are 1 when `unit_costs`,
    /// otherwise integers in `1..=9`.
    pub fn generate<R: Rng + ?Sized>(
        nodes: usize,
        extra_edges: usize,
        goal_chance: f64,
        unit_costs: bool,
        rng: &mut R,
    ) -> Self {
        let n = nodes.max(2);
        let cost = |rng: &mut R| {
            if unit_costs {
                1.0
            } else {
                f64::from(rng.gen_range(1u32..=9))
            }
        };

        let mut edges = vec![Vec::new(); n];
        for (i, out) in edges.iter_mut().enumerate().take(n - 1) {
            out.push((i + 1, cost(rng)));
            for _ in 0..rng.gen_range(0..=extra_edges) {
                let to = rng.gen_range(i + 1..n);
                out.push((to, cost(rng)));
            }
        }

        let mut goals: Vec<bool> = (0..n).map(|i| i > 0 && rng.gen_bool(goal_chance)).collect();
        goals[n - 1] = true;

        // Cost-to-goal by reverse DP; half of it is a consistent estimate.
        let mut to_goal = vec![f64::INFINITY; n];
        for (i, out) in edges.iter().enumerate().rev() {
            if goals[i] {
                to_goal[i] = 0.0;
                continue;
            }
            to_goal[i] = out
                .iter()
                .map(|&(to, c)| c + to_goal[to])
                .fold(f64::INFINITY, f64::min);
        }
        let estimates = to_goal.iter().map(|h| h * 0.5).collect();

        Self {
            edges,
            goals,
            estimates,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// `true` if `to` is a direct successor of `from` at cost `cost`.
    #[must_use]
    pub fn has_edge(&self, from: usize, to: usize, cost: f64) -> bool {
        self.edges[from]
            .iter()
            .any(|&(t, c)| t == to && (c - cost).abs() < 1e-9)
    }

    /// Cheapest path cost from the root to any goal (forward relaxation in
    /// index order, which is a topological order).
    #[must_use]
    pub fn cheapest_goal_cost(&self) -> f64 {
        let n = self.node_count();
        let mut best = vec![f64::INFINITY; n];
        best[0] = 0.0;
        for (i, out) in self.edges.iter().enumerate() {
            for &(to, c) in out {
                best[to] = best[to].min(best[i] + c);
            }
        }
        (0..n)
            .filter(|&i| self.goals[i])
            .map(|i| best[i])
            .fold(f64::INFINITY, f64::min)
    }

    /// Fewest edges from the root to any goal.
    #[must_use]
    pub fn shallowest_goal_depth(&self) -> u32 {
        let n = self.node_count();
        let mut depth: Vec<Option<u32>> = vec![None; n];
        depth[0] = Some(0);
        let mut queue = VecDeque::from([0usize]);
        while let Some(i) = queue.pop_front() {
            let d = depth[i].unwrap_or(0);
            if self.goals[i] {
                return d;
            }
            for &(to, _) in &self.edges[i] {
                if depth[to].is_none() {
                    depth[to] = Some(d + 1);
                    queue.push_back(to);
                }
            }
        }
        u32::MAX
    }
}

impl Problem for RandomDag {
    type State = usize;
    type Action = usize;

    fn initial_state(&self) -> usize {
        0
    }

    fn successors(&self, state: &usize) -> Vec<Successor<usize, usize>> {
        self.edges[*state]
            .iter()
            .map(|&(to, c)| Successor::new(to, to, c))
            .collect()
    }

    fn is_goal(&self, state: &usize) -> bool {
        self.goals[*state]
    }

    fn heuristic(&self, state: &usize) -> Option<f64> {
        Some(self.estimates[*state])
    }

    fn value(&self, state: &usize) -> Option<f64> {
        self.heuristic(state).map(|h| -h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_answers_on_a_known_shape() {
        let dag = RandomDag::generate(2, 0, 0.0, true, &mut seeded(1));
        assert_eq!(dag.node_count(), 2);
        assert!((dag.cheapest_goal_cost() - 1.0).abs() < 1e-9);
        assert_eq!(dag.shallowest_goal_depth(), 1);
        assert_eq!(dag.heuristic(&0), Some(0.5));
    }

    #[test]
    fn last_state_is_always_a_reachable_goal() {
        for seed in 0..20 {
            let dag = RandomDag::generate(30, 3, 0.05, false, &mut seeded(seed));
            assert!(dag.is_goal(&29));
            assert!(dag.cheapest_goal_cost().is_finite());
        }
    }
}
