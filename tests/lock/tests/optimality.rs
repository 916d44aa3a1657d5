//! Lock tests: cost and depth optimality.
//!
//! Uniform-cost and A* (with a consistent heuristic) return cheapest goals in
//! tree mode; breadth-first returns a shallowest goal under unit costs.
//! Graph mode suppresses a state at its first generation, so cost optimality
//! is only claimed for tree mode.

use lock_tests::{seeded, RandomDag};
use lodestar_harness::worlds::route_map::RouteMap;
use lodestar_search::search::{astar_search, breadth_first_search, uniform_cost_search};

const ROMANIA_OPTIMAL_COST: f64 = 418.0;

// ---------------------------------------------------------------------------
// ACCEPTANCE: MINIMUM-COST GOALS
// ---------------------------------------------------------------------------

#[test]
fn uniform_cost_and_astar_match_reference_cost() {
    for seed in 0..60 {
        let dag = RandomDag::generate(20, 3, 0.08, false, &mut seeded(seed));
        let expected = dag.cheapest_goal_cost();

        let ucs = uniform_cost_search(&dag, false).unwrap().unwrap();
        assert!(
            (ucs.cost - expected).abs() < 1e-9,
            "seed {seed}: UCS cost {} != {expected}",
            ucs.cost
        );

        let astar = astar_search(&dag, false).unwrap().unwrap();
        assert!(
            (astar.cost - expected).abs() < 1e-9,
            "seed {seed}: A* cost {} != {expected}",
            astar.cost
        );
    }
}

#[test]
fn romania_cheapest_route_goes_through_pitesti() {
    let map = RouteMap::romania();
    for goal in [
        uniform_cost_search(&map, false).unwrap().unwrap(),
        astar_search(&map, false).unwrap().unwrap(),
    ] {
        assert!((goal.cost - ROMANIA_OPTIMAL_COST).abs() < 1e-9);
        let route: Vec<&str> = goal.states().into_iter().map(String::as_str).collect();
        assert_eq!(
            route,
            vec!["Arad", "Sibiu", "Rimnicu Vilcea", "Pitesti", "Bucharest"]
        );
    }
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: MINIMUM-DEPTH GOALS
// ---------------------------------------------------------------------------

#[test]
fn breadth_first_finds_shallowest_goal_under_unit_costs() {
    for seed in 0..60 {
        let dag = RandomDag::generate(30, 3, 0.05, true, &mut seeded(seed));
        let expected = dag.shallowest_goal_depth();
        for graph_search in [false, true] {
            let goal = breadth_first_search(&dag, graph_search).unwrap().unwrap();
            assert_eq!(
                goal.depth, expected,
                "seed {seed}, graph_search {graph_search}"
            );
        }
    }
}

#[test]
fn romania_shallowest_route_goes_through_fagaras() {
    let map = RouteMap::romania();
    let goal = breadth_first_search(&map, true).unwrap().unwrap();
    assert_eq!(goal.depth, 3);
    let route: Vec<&str> = goal.states().into_iter().map(String::as_str).collect();
    assert_eq!(route, vec!["Arad", "Sibiu", "Fagaras", "Bucharest"]);
    assert!((goal.cost - 450.0).abs() < 1e-9);
}
