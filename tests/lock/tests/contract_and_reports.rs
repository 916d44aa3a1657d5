//! Lock tests: the three-state chain scenario, contract violations surfacing
//! as typed errors, and byte-stable reports.

use lock_tests::{seeded, RandomDag};
use lodestar_harness::runner::{run_strategy, RunConfig, RunError, Strategy};
use lodestar_harness::worlds::queens::Queens;
use lodestar_harness::worlds::route_map::RouteMap;
use lodestar_search::contract::{Problem, Successor};
use lodestar_search::error::ScoreKind;
use lodestar_search::monitor::NoOpMonitor;
use lodestar_search::policy::SearchPolicy;
use lodestar_search::schedule::ExpSchedule;
use lodestar_search::search::{
    astar_search, beam_search, breadth_first_search, greedy_search, search_with_policy,
    uniform_cost_search,
};
use lodestar_search::{simulated_annealing, SearchError};

// ---------------------------------------------------------------------------
// ACCEPTANCE: CHAIN SCENARIO
// ---------------------------------------------------------------------------

#[test]
fn uniform_cost_on_chain_returns_c_at_cost_two() {
    let goal = uniform_cost_search(&RouteMap::chain(), false)
        .unwrap()
        .unwrap();
    assert_eq!(goal.state, "C");
    assert!((goal.cost - 2.0).abs() < f64::EPSILON);
    assert_eq!(goal.depth, 2);
    assert_eq!(goal.states(), vec!["A", "B", "C"]);
    assert_eq!(goal.actions(), vec!["B", "C"]);
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: CONTRACT VIOLATIONS ARE TYPED ERRORS
// ---------------------------------------------------------------------------

/// Two states whose scores are configurable, to inject bad numbers.
struct Scored {
    step_cost: f64,
    heuristic: Option<f64>,
    value: Option<f64>,
}

impl Problem for Scored {
    type State = u8;
    type Action = ();

    fn initial_state(&self) -> u8 {
        0
    }

    fn successors(&self, state: &u8) -> Vec<Successor<u8, ()>> {
        if *state == 0 {
            vec![Successor::new((), 1, self.step_cost)]
        } else {
            Vec::new()
        }
    }

    fn is_goal(&self, state: &u8) -> bool {
        *state == 1
    }

    fn heuristic(&self, _state: &u8) -> Option<f64> {
        self.heuristic
    }

    fn value(&self, _state: &u8) -> Option<f64> {
        self.value
    }
}

#[test]
fn informed_search_without_heuristic_fails() {
    let problem = Scored {
        step_cost: 1.0,
        heuristic: None,
        value: None,
    };
    for result in [greedy_search(&problem, false), astar_search(&problem, true)] {
        assert!(matches!(
            result.unwrap_err(),
            SearchError::MissingHeuristic { .. }
        ));
    }
    assert!(matches!(
        beam_search(&problem, 4).unwrap_err(),
        SearchError::MissingValue { .. }
    ));
}

#[test]
fn nan_heuristic_is_rejected() {
    let problem = Scored {
        step_cost: 1.0,
        heuristic: Some(f64::NAN),
        value: None,
    };
    let err = astar_search(&problem, false).unwrap_err();
    assert!(matches!(
        err,
        SearchError::NanScore {
            kind: ScoreKind::Heuristic,
            ..
        }
    ));
}

#[test]
fn negative_step_cost_is_accepted() {
    let problem = Scored {
        step_cost: -1.0,
        heuristic: None,
        value: None,
    };
    for graph_search in [false, true] {
        let bfs = breadth_first_search(&problem, graph_search).unwrap().unwrap();
        assert_eq!(bfs.state, 1);
        let ucs = uniform_cost_search(&problem, graph_search)
            .unwrap()
            .unwrap();
        assert_eq!(ucs.state, 1);
        assert!((ucs.cost + 1.0).abs() < f64::EPSILON);
    }
}

#[test]
fn nan_step_cost_is_rejected() {
    let problem = Scored {
        step_cost: f64::NAN,
        heuristic: None,
        value: None,
    };
    let err = uniform_cost_search(&problem, false).unwrap_err();
    assert!(matches!(
        err,
        SearchError::NanScore {
            kind: ScoreKind::StepCost,
            ..
        }
    ));
}

/// Root 0 with a dead end 1 (h = +inf) listed before the goal 2.
struct DeadEnd;

impl Problem for DeadEnd {
    type State = u8;
    type Action = u8;

    fn initial_state(&self) -> u8 {
        0
    }

    fn successors(&self, state: &u8) -> Vec<Successor<u8, u8>> {
        match state {
            0 => vec![Successor::unit(1, 1), Successor::unit(2, 2)],
            1 => vec![Successor::unit(3, 3)],
            _ => Vec::new(),
        }
    }

    fn is_goal(&self, state: &u8) -> bool {
        *state == 2
    }

    fn heuristic(&self, state: &u8) -> Option<f64> {
        Some(match state {
            1 | 3 => f64::INFINITY,
            0 => 1.0,
            _ => 0.0,
        })
    }
}

#[test]
fn infinite_heuristic_marks_a_dead_end() {
    for graph_search in [false, true] {
        let greedy = greedy_search(&DeadEnd, graph_search).unwrap().unwrap();
        assert_eq!(greedy.states(), vec![&0, &2]);
        let astar = astar_search(&DeadEnd, graph_search).unwrap().unwrap();
        assert_eq!(astar.states(), vec![&0, &2]);
    }
}

#[test]
fn zero_beam_width_is_rejected_before_any_step() {
    let problem = Scored {
        step_cost: 1.0,
        heuristic: None,
        value: Some(0.0),
    };
    assert_eq!(
        beam_search(&problem, 0).unwrap_err(),
        SearchError::InvalidBeamWidth { width: 0 }
    );
}

#[test]
fn nan_temperature_is_rejected() {
    let schedule = |_t: u64| f64::NAN;
    let err = simulated_annealing(&Queens::new(4), &schedule).unwrap_err();
    assert!(matches!(err, SearchError::InvalidSchedule { step: 0, .. }));
}

#[test]
fn no_solution_is_none_not_an_error() {
    let problem = Scored {
        step_cost: 1.0,
        heuristic: Some(0.0),
        value: None,
    };
    let dead_end = RouteMap::new("A", "Z").with_road("A", "B", 1.0);
    assert!(uniform_cost_search(&dead_end, true).unwrap().is_none());
    assert!(astar_search(&problem, true).unwrap().is_some());
}

// ---------------------------------------------------------------------------
// ACCEPTANCE: REPORT DETERMINISM
// ---------------------------------------------------------------------------

#[test]
fn seeded_stats_bytes_are_identical() {
    let dag = RandomDag::generate(50, 4, 0.03, false, &mut seeded(8));
    let policy = SearchPolicy::beam(3).with_seed(5);
    let first = search_with_policy(&dag, &policy, &mut NoOpMonitor)
        .unwrap()
        .stats
        .to_canonical_json_bytes()
        .unwrap();
    for _ in 0..5 {
        let again = search_with_policy(&dag, &policy, &mut NoOpMonitor)
            .unwrap()
            .stats
            .to_canonical_json_bytes()
            .unwrap();
        assert_eq!(first, again, "stats bytes differ across runs");
    }
}

#[test]
fn run_reports_from_json_config_are_reproducible() {
    let config = RunConfig::from_json_bytes(
        br#"{"strategy":"simulated_annealing","seed":42,"schedule":{"k":5.0,"limit":300}}"#,
    )
    .unwrap();
    assert_eq!(config.schedule, Some(ExpSchedule::new(5.0, 0.005, 300)));

    let queens = Queens::new(8);
    let first = run_strategy(&queens, &config)
        .unwrap()
        .to_canonical_json_bytes()
        .unwrap();
    let second = run_strategy(&queens, &config)
        .unwrap()
        .to_canonical_json_bytes()
        .unwrap();
    assert_eq!(first, second);

    let parsed: serde_json::Value = serde_json::from_slice(&first).unwrap();
    assert_eq!(parsed["strategy"], "simulated_annealing");
    assert_eq!(parsed["config"]["seed"], 42);
    assert!(parsed["stats"]["steps"].as_u64().unwrap() <= 300);
}

#[test]
fn runner_reports_romania_astar_route() {
    let config = RunConfig::new(Strategy::AStar);
    let report = run_strategy(&RouteMap::romania(), &config).unwrap();
    assert!(report.solved);
    assert_eq!(report.cost, Some(418.0));
    assert_eq!(report.path.len(), 5);
}

#[test]
fn runner_rejects_unknown_strategy() {
    let err = RunConfig::from_json_bytes(br#"{"strategy":"teleport"}"#).unwrap_err();
    assert_eq!(
        err,
        RunError::UnknownStrategy {
            name: "teleport".into()
        }
    );
}
