//! Lock tests: every systematic traversal reaches a goal on finite acyclic
//! spaces with a reachable goal, and returns a path the problem can replay.

use lock_tests::{seeded, RandomDag};
use lodestar_search::contract::Problem;
use lodestar_search::node::SearchNode;
use lodestar_search::search::{
    astar_search, breadth_first_search, depth_first_search, greedy_search,
    iterative_limited_depth_first_search, uniform_cost_search,
};
use lodestar_search::SearchError;

type Traversal = fn(&RandomDag, bool) -> Result<Option<std::rc::Rc<SearchNode<usize, usize>>>, SearchError>;

const TRAVERSALS: [(&str, Traversal); 6] = [
    ("breadth_first", breadth_first_search::<RandomDag>),
    ("depth_first", depth_first_search::<RandomDag>),
    ("iterative_deepening", iterative_limited_depth_first_search::<RandomDag>),
    ("uniform_cost", uniform_cost_search::<RandomDag>),
    ("greedy", greedy_search::<RandomDag>),
    ("astar", astar_search::<RandomDag>),
];

/// The node's path starts at the root, follows real edges, and its recorded
/// cost and depth match the walk.
fn assert_replayable(dag: &RandomDag, node: &SearchNode<usize, usize>, name: &str) {
    let path = node.path();
    assert_eq!(path[0].state, dag.initial_state(), "{name}: path must start at root");
    let mut cost = 0.0;
    for pair in path.windows(2) {
        let step = pair[1].cost - pair[0].cost;
        assert!(
            dag.has_edge(pair[0].state, pair[1].state, step),
            "{name}: {} -> {} is not an edge",
            pair[0].state,
            pair[1].state
        );
        assert_eq!(pair[1].depth, pair[0].depth + 1);
        cost += step;
    }
    assert!((cost - node.cost).abs() < 1e-9);
    assert_eq!(node.depth as usize, path.len() - 1);
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: COMPLETENESS ON FINITE ACYCLIC SPACES
// ---------------------------------------------------------------------------

#[test]
fn every_traversal_finds_a_goal_in_tree_mode() {
    for seed in 0..40 {
        let dag = RandomDag::generate(25, 3, 0.05, false, &mut seeded(seed));
        for (name, traversal) in TRAVERSALS {
            let goal = traversal(&dag, false)
                .unwrap()
                .unwrap_or_else(|| panic!("{name} found no goal for seed {seed}"));
            assert!(dag.is_goal(&goal.state), "{name}: returned a non-goal");
            assert_replayable(&dag, &goal, name);
        }
    }
}

#[test]
fn every_traversal_finds_a_goal_in_graph_mode() {
    for seed in 100..140 {
        let dag = RandomDag::generate(40, 4, 0.02, false, &mut seeded(seed));
        for (name, traversal) in TRAVERSALS {
            let goal = traversal(&dag, true)
                .unwrap()
                .unwrap_or_else(|| panic!("{name} found no goal for seed {seed}"));
            assert!(dag.is_goal(&goal.state), "{name}: returned a non-goal");
            assert_replayable(&dag, &goal, name);
        }
    }
}

#[test]
fn root_goal_is_returned_without_expansion() {
    struct AlreadyThere;

    impl Problem for AlreadyThere {
        type State = u8;
        type Action = ();

        fn initial_state(&self) -> u8 {
            0
        }

        fn successors(&self, _state: &u8) -> Vec<lodestar_search::Successor<u8, ()>> {
            vec![lodestar_search::Successor::unit((), 1)]
        }

        fn is_goal(&self, state: &u8) -> bool {
            *state == 0
        }

        fn heuristic(&self, _state: &u8) -> Option<f64> {
            Some(0.0)
        }
    }

    let goal = breadth_first_search(&AlreadyThere, false).unwrap().unwrap();
    assert_eq!(goal.depth, 0);
    assert!(goal.parent.is_none());
    assert!(goal.actions().is_empty());
    let goal = astar_search(&AlreadyThere, true).unwrap().unwrap();
    assert_eq!(goal.state, 0);
}
