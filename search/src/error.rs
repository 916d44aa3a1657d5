//! Typed search errors.
//!
//! `SearchError` represents contract violations and invalid configuration.
//! Running out of fringe without reaching a goal is not an error; it is
//! reported as an absent result (`Ok(None)`).

/// Which problem callback produced an unusable number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    /// `Problem::heuristic`.
    Heuristic,
    /// `Problem::value`.
    Value,
    /// `Successor::step_cost`.
    StepCost,
}

impl std::fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heuristic => write!(f, "heuristic"),
            Self::Value => write!(f, "value"),
            Self::StepCost => write!(f, "step cost"),
        }
    }
}

/// Typed failure for search execution.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The strategy needs `Problem::heuristic` but the problem returned `None`.
    MissingHeuristic { state: String },
    /// The strategy needs `Problem::value` but the problem returned `None`.
    MissingValue { state: String },
    /// A heuristic, value, or step cost was NaN.
    NanScore {
        kind: ScoreKind,
        raw: f64,
        state: String,
    },
    /// Beam search requires a width of at least 1.
    InvalidBeamWidth { width: usize },
    /// A cooling schedule produced a negative or NaN temperature.
    InvalidSchedule { step: u64, temperature: f64 },
    /// The policy combination cannot be executed.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeuristic { state } => {
                write!(f, "problem has no heuristic for state {state}")
            }
            Self::MissingValue { state } => {
                write!(f, "problem has no value for state {state}")
            }
            Self::NanScore { kind, raw, state } => {
                write!(f, "unusable {kind} {raw} for state {state}")
            }
            Self::InvalidBeamWidth { width } => {
                write!(f, "beam width must be at least 1, got {width}")
            }
            Self::InvalidSchedule { step, temperature } => {
                write!(
                    f,
                    "cooling schedule returned temperature {temperature} at step {step}"
                )
            }
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
