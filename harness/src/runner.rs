//! Harness runner: runs any search strategy by name against a problem and
//! packages the outcome as a report.
//!
//! The runner owns configuration and reporting only. All search behavior
//! lives in `lodestar_search`; the runner picks the entry point, wires a
//! seeded RNG and an expansion cap, and renders the result.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::from_json_bytes() → run_strategy()
//!   → SearchPolicy / NeighborSelection / ExpSchedule
//!   → search_with_policy() | iterative_deepening_search()
//!     | hill_climbing_search() | annealing_search()
//!   → RunReport → to_canonical_json_bytes()
//! ```

use std::hash::Hash;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lodestar_search::contract::Problem;
use lodestar_search::error::SearchError;
use lodestar_search::local::{annealing_search, hill_climbing_search, NeighborSelection};
use lodestar_search::monitor::ExpansionLimitMonitor;
use lodestar_search::node::SearchNode;
use lodestar_search::policy::SearchPolicy;
use lodestar_search::schedule::ExpSchedule;
use lodestar_search::search::{iterative_deepening_search, search_with_policy};

/// Default values for run parameters left unset in a [`RunConfig`].
const DEFAULT_DEPTH_LIMIT: u32 = 10;
const DEFAULT_BEAM_WIDTH: usize = 100;
const DEFAULT_SEED: u64 = 0;

/// Every search strategy the runner can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    DepthLimited,
    IterativeDeepening,
    UniformCost,
    Greedy,
    AStar,
    Beam,
    HillClimbingBasic,
    HillClimbingStochastic,
    HillClimbingFirstChoice,
    SimulatedAnnealing,
}

impl Strategy {
    pub const ALL: [Strategy; 12] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::DepthLimited,
        Strategy::IterativeDeepening,
        Strategy::UniformCost,
        Strategy::Greedy,
        Strategy::AStar,
        Strategy::Beam,
        Strategy::HillClimbingBasic,
        Strategy::HillClimbingStochastic,
        Strategy::HillClimbingFirstChoice,
        Strategy::SimulatedAnnealing,
    ];

    /// Config name of the strategy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
            Self::DepthLimited => "depth_limited",
            Self::IterativeDeepening => "iterative_deepening",
            Self::UniformCost => "uniform_cost",
            Self::Greedy => "greedy",
            Self::AStar => "astar",
            Self::Beam => "beam",
            Self::HillClimbingBasic => "hill_climbing_basic",
            Self::HillClimbingStochastic => "hill_climbing_stochastic",
            Self::HillClimbingFirstChoice => "hill_climbing_first_choice",
            Self::SimulatedAnnealing => "simulated_annealing",
        }
    }

    /// `true` for the single-current-node strategies.
    #[must_use]
    pub fn is_local(self) -> bool {
        matches!(
            self,
            Self::HillClimbingBasic
                | Self::HillClimbingStochastic
                | Self::HillClimbingFirstChoice
                | Self::SimulatedAnnealing
        )
    }
}

impl FromStr for Strategy {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| RunError::UnknownStrategy { name: s.to_owned() })
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run configuration with optional overrides.
///
/// Parameters a strategy does not use are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub strategy: Strategy,
    /// Deduplicate states. `None` means tree search.
    pub graph_search: Option<bool>,
    /// Limit for `depth_limited`. `None` uses `DEFAULT_DEPTH_LIMIT`.
    pub depth_limit: Option<u32>,
    /// Width for `beam`. `None` uses `DEFAULT_BEAM_WIDTH`.
    pub beam_width: Option<usize>,
    /// Annealing schedule. `None` uses [`ExpSchedule::default`].
    pub schedule: Option<ExpSchedule>,
    /// Seed for every random choice. `None` uses `DEFAULT_SEED`.
    pub seed: Option<u64>,
    /// Stop after this many expansions (or local-search steps). `None` is unbounded.
    pub max_expansions: Option<u64>,
}

impl RunConfig {
    /// Config for `strategy` with every override unset.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            graph_search: None,
            depth_limit: None,
            beam_width: None,
            schedule: None,
            seed: None,
            max_expansions: None,
        }
    }

    /// Parse a config from a JSON object.
    ///
    /// `strategy` is required. Optional keys: `graph_search`, `depth_limit`,
    /// `beam_width`, `seed`, `max_expansions`, and `schedule` as an object
    /// with `k`, `lambda` and `limit` (missing fields take their defaults).
    /// Unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::InvalidConfig`] for malformed JSON, a missing or
    /// mistyped field, or an unknown key, and [`RunError::UnknownStrategy`]
    /// for an unrecognized strategy name.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, RunError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| RunError::InvalidConfig {
                detail: format!("invalid JSON: {e}"),
            })?;
        let obj = value.as_object().ok_or_else(|| RunError::InvalidConfig {
            detail: "config must be a JSON object".into(),
        })?;

        for key in obj.keys() {
            if !CONFIG_KEYS.contains(&key.as_str()) {
                return Err(RunError::InvalidConfig {
                    detail: format!("unknown key {key:?}"),
                });
            }
        }

        let strategy = obj
            .get("strategy")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| RunError::InvalidConfig {
                detail: "missing string field \"strategy\"".into(),
            })?
            .parse::<Strategy>()?;

        let schedule = match obj.get("schedule") {
            None => None,
            Some(raw) => Some(parse_schedule(raw)?),
        };

        Ok(Self {
            strategy,
            graph_search: optional(obj, "graph_search", serde_json::Value::as_bool)?,
            depth_limit: optional(obj, "depth_limit", as_u32)?,
            beam_width: optional(obj, "beam_width", as_usize)?,
            schedule,
            seed: optional(obj, "seed", serde_json::Value::as_u64)?,
            max_expansions: optional(obj, "max_expansions", serde_json::Value::as_u64)?,
        })
    }

    /// Config echo with defaults filled in.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let schedule = self.schedule.unwrap_or_default();
        serde_json::json!({
            "beam_width": self.beam_width.unwrap_or(DEFAULT_BEAM_WIDTH),
            "depth_limit": self.depth_limit.unwrap_or(DEFAULT_DEPTH_LIMIT),
            "graph_search": self.graph_search.unwrap_or(false),
            "max_expansions": self.max_expansions,
            "schedule": {
                "k": schedule.k,
                "lambda": schedule.lambda,
                "limit": schedule.limit,
            },
            "seed": self.seed.unwrap_or(DEFAULT_SEED),
            "strategy": self.strategy.as_str(),
        })
    }
}

const CONFIG_KEYS: [&str; 7] = [
    "beam_width",
    "depth_limit",
    "graph_search",
    "max_expansions",
    "schedule",
    "seed",
    "strategy",
];

fn optional<T>(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    read: impl Fn(&serde_json::Value) -> Option<T>,
) -> Result<Option<T>, RunError> {
    match obj.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(raw) => read(raw).map(Some).ok_or_else(|| RunError::InvalidConfig {
            detail: format!("field {key:?} has the wrong type: {raw}"),
        }),
    }
}

fn as_u32(value: &serde_json::Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn as_usize(value: &serde_json::Value) -> Option<usize> {
    value.as_u64().and_then(|n| usize::try_from(n).ok())
}

fn parse_schedule(raw: &serde_json::Value) -> Result<ExpSchedule, RunError> {
    let obj = raw.as_object().ok_or_else(|| RunError::InvalidConfig {
        detail: "\"schedule\" must be an object".into(),
    })?;
    let defaults = ExpSchedule::default();
    Ok(ExpSchedule::new(
        optional(obj, "k", serde_json::Value::as_f64)?.unwrap_or(defaults.k),
        optional(obj, "lambda", serde_json::Value::as_f64)?.unwrap_or(defaults.lambda),
        optional(obj, "limit", serde_json::Value::as_u64)?.unwrap_or(defaults.limit),
    ))
}

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// The strategy name is not one of [`Strategy::ALL`].
    UnknownStrategy { name: String },
    /// The config could not be parsed.
    InvalidConfig { detail: String },
    /// The search itself failed.
    Search(SearchError),
    /// Report serialization failed.
    ReportFailed { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStrategy { name } => write!(f, "unknown strategy {name:?}"),
            Self::InvalidConfig { detail } => write!(f, "invalid run config: {detail}"),
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::ReportFailed { detail } => write!(f, "report serialization failed: {detail}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// Outcome of one harness run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub strategy: Strategy,
    /// Config echo with defaults filled in.
    pub config: serde_json::Value,
    /// `true` if the returned node passes the goal test.
    pub solved: bool,
    /// Debug rendering of each state from the root to the returned node.
    /// Empty when a traversal found nothing.
    pub path: Vec<String>,
    /// Path cost of the returned node.
    pub cost: Option<f64>,
    /// Depth of the returned node.
    pub depth: Option<u32>,
    /// `SearchStats` or `LocalSearchStats` JSON, depending on the strategy.
    pub stats: serde_json::Value,
}

impl RunReport {
    /// Convert to a `serde_json::Value`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "config": self.config,
            "cost": self.cost,
            "depth": self.depth,
            "path": self.path,
            "solved": self.solved,
            "stats": self.stats,
            "strategy": self.strategy.as_str(),
        })
    }

    /// Serialize to compact JSON bytes with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ReportFailed`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, RunError> {
        serde_json::to_vec(&self.to_json_value()).map_err(|e| RunError::ReportFailed {
            detail: e.to_string(),
        })
    }
}

/// Run the configured strategy against `problem`.
///
/// Randomized strategies draw from a `ChaCha8Rng` seeded with the config
/// seed, so a config reproduces its report exactly.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the search fails (invalid policy or a
/// problem that breaks its contract).
pub fn run_strategy<P>(problem: &P, config: &RunConfig) -> Result<RunReport, RunError>
where
    P: Problem,
    P::State: Eq + Hash,
{
    let graph_search = config.graph_search.unwrap_or(false);
    let seed = config.seed.unwrap_or(DEFAULT_SEED);
    let mut monitor = ExpansionLimitMonitor::new(config.max_expansions.unwrap_or(u64::MAX));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    log::debug!("running {} with seed {seed}", config.strategy);

    let (node, stats) = match plan_for(config, graph_search) {
        Plan::Traverse(policy) => {
            let policy = policy.with_seed(seed);
            let result = search_with_policy(problem, &policy, &mut monitor)?;
            (result.goal, result.stats.to_json_value())
        }
        Plan::Deepen => {
            let result = iterative_deepening_search(problem, graph_search, &mut monitor)?;
            (result.goal, result.stats.to_json_value())
        }
        Plan::Climb(selection) => {
            let result = hill_climbing_search(problem, selection, &mut rng, &mut monitor)?;
            (Some(result.node), result.stats.to_json_value())
        }
        Plan::Anneal(schedule) => {
            let result = annealing_search(problem, &schedule, &mut rng, &mut monitor)?;
            (Some(result.node), result.stats.to_json_value())
        }
    };

    Ok(build_report(problem, config, node.as_deref(), stats))
}

/// How a strategy is executed.
enum Plan {
    Traverse(SearchPolicy),
    Deepen,
    Climb(NeighborSelection),
    Anneal(ExpSchedule),
}

fn plan_for(config: &RunConfig, graph_search: bool) -> Plan {
    match config.strategy {
        Strategy::BreadthFirst => Plan::Traverse(SearchPolicy::breadth_first(graph_search)),
        Strategy::DepthFirst => Plan::Traverse(SearchPolicy::depth_first(graph_search)),
        Strategy::DepthLimited => Plan::Traverse(SearchPolicy::depth_limited(
            config.depth_limit.unwrap_or(DEFAULT_DEPTH_LIMIT),
            graph_search,
        )),
        Strategy::IterativeDeepening => Plan::Deepen,
        Strategy::UniformCost => Plan::Traverse(SearchPolicy::uniform_cost(graph_search)),
        Strategy::Greedy => Plan::Traverse(SearchPolicy::greedy(graph_search)),
        Strategy::AStar => Plan::Traverse(SearchPolicy::astar(graph_search)),
        Strategy::Beam => Plan::Traverse(SearchPolicy::beam(
            config.beam_width.unwrap_or(DEFAULT_BEAM_WIDTH),
        )),
        Strategy::HillClimbingBasic => Plan::Climb(NeighborSelection::Best),
        Strategy::HillClimbingStochastic => Plan::Climb(NeighborSelection::Stochastic),
        Strategy::HillClimbingFirstChoice => Plan::Climb(NeighborSelection::FirstChoice),
        Strategy::SimulatedAnnealing => Plan::Anneal(config.schedule.unwrap_or_default()),
    }
}

fn build_report<P: Problem>(
    problem: &P,
    config: &RunConfig,
    node: Option<&SearchNode<P::State, P::Action>>,
    stats: serde_json::Value,
) -> RunReport {
    let path = node
        .map(|n| n.states().iter().map(|s| format!("{s:?}")).collect())
        .unwrap_or_default();
    RunReport {
        strategy: config.strategy,
        config: config.to_json_value(),
        solved: node.is_some_and(|n| problem.is_goal(&n.state)),
        path,
        cost: node.map(|n| n.cost),
        depth: node.map(|n| n.depth),
        stats,
    }
}
