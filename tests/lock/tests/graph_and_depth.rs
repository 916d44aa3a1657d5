//! Lock tests: graph-search deduplication on cyclic spaces, depth limits,
//! and iterative deepening.

use std::collections::HashMap;

use lock_tests::{seeded, RandomDag};
use lodestar_harness::worlds::ring::{Ring, Turn};
use lodestar_search::monitor::{ExpansionLimitMonitor, SearchCommand, SearchMonitor};
use lodestar_search::node::SearchNode;
use lodestar_search::policy::SearchPolicy;
use lodestar_search::search::{
    breadth_first_search, iterative_deepening_search, iterative_limited_depth_first_search,
    limited_depth_first_search, search_with_policy,
};
use lodestar_search::stats::TerminationReason;

/// Counts how often each ring position is expanded.
#[derive(Default)]
struct ExpansionCounter {
    counts: HashMap<u32, u32>,
}

impl SearchMonitor<u32, Turn> for ExpansionCounter {
    fn name(&self) -> &str {
        "ExpansionCounter"
    }

    fn on_expand(&mut self, node: &SearchNode<u32, Turn>) {
        *self.counts.entry(node.state).or_default() += 1;
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: GRAPH SEARCH ADMITS EACH STATE ONCE
// ---------------------------------------------------------------------------

#[test]
fn graph_search_expands_each_ring_position_once() {
    let ring = Ring::new(12);
    for policy in [
        SearchPolicy::breadth_first(true),
        SearchPolicy::depth_first(true),
        SearchPolicy::uniform_cost(true),
    ] {
        let mut counter = ExpansionCounter::default();
        let result = search_with_policy(&ring, &policy, &mut counter).unwrap();
        assert!(result.goal.is_none());
        assert_eq!(result.stats.termination_reason, TerminationReason::FringeExhausted);

        // The root is not in the visited set, so position 0 is admitted once
        // more when it is first generated as a child.
        for (position, count) in &counter.counts {
            let allowed = if *position == 0 { 2 } else { 1 };
            assert!(
                *count <= allowed,
                "position {position} expanded {count} times under {:?}",
                policy.fringe
            );
        }
        assert_eq!(counter.counts.len(), 12);
        assert_eq!(result.stats.expansions, 13);
        assert_eq!(
            result.stats.nodes_generated - result.stats.duplicates_suppressed,
            12
        );
    }
}

#[test]
fn tree_search_revisits_ring_positions() {
    let ring = Ring::new(4).with_goal(2);
    let mut monitor = ExpansionLimitMonitor::new(1_000);
    let result =
        search_with_policy(&ring, &SearchPolicy::breadth_first(false), &mut monitor).unwrap();
    let goal = result.goal.unwrap();
    assert_eq!(goal.depth, 2);
    assert_eq!(result.stats.duplicates_suppressed, 0);
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: DEPTH LIMITS
// ---------------------------------------------------------------------------

#[test]
fn limited_search_never_returns_a_goal_below_the_limit() {
    for seed in 0..40 {
        let dag = RandomDag::generate(30, 2, 0.1, true, &mut seeded(seed));
        for limit in 0..6 {
            if let Some(goal) = limited_depth_first_search(&dag, limit, false).unwrap() {
                assert!(goal.depth <= limit, "seed {seed}: depth {} > {limit}", goal.depth);
            }
        }
    }
}

#[test]
fn limit_below_goal_depth_finds_nothing() {
    let ring = Ring::new(20).with_goal(5);
    assert!(limited_depth_first_search(&ring, 4, false)
        .unwrap()
        .is_none());
    let goal = limited_depth_first_search(&ring, 5, false).unwrap().unwrap();
    assert_eq!(goal.depth, 5);
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: ITERATIVE DEEPENING MATCHES BREADTH-FIRST DEPTH
// ---------------------------------------------------------------------------

#[test]
fn iterative_deepening_matches_breadth_first_depth() {
    for seed in 0..40 {
        let dag = RandomDag::generate(30, 3, 0.05, true, &mut seeded(seed));
        let bfs = breadth_first_search(&dag, false).unwrap().unwrap();
        let ids = iterative_limited_depth_first_search(&dag, false)
            .unwrap()
            .unwrap();
        assert_eq!(ids.depth, bfs.depth, "seed {seed}");
    }
}

#[test]
fn iterative_deepening_stops_when_a_finite_space_is_exhausted() {
    let ring = Ring::new(8);
    let mut monitor = ExpansionLimitMonitor::new(u64::MAX);
    let result = iterative_deepening_search(&ring, true, &mut monitor).unwrap();
    assert!(result.goal.is_none());
    assert_eq!(result.stats.termination_reason, TerminationReason::FringeExhausted);
    assert!(result.stats.passes > 1);
}

#[test]
fn iterative_deepening_on_an_endless_space_is_bounded_by_a_monitor() {
    let ring = Ring::new(8);
    let mut monitor = ExpansionLimitMonitor::new(500);
    let result = iterative_deepening_search(&ring, false, &mut monitor).unwrap();
    assert!(result.goal.is_none());
    assert!(matches!(
        result.stats.termination_reason,
        TerminationReason::MonitorTerminated { .. }
    ));
    assert_eq!(result.stats.expansions, 500);
}
