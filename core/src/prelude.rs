use crate::sweep::ClassBalance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ground-truth label paired with the predicted probability of the positive class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord<L> {
    pub truth: L,
    pub score: f64,
}

impl<L> PredictionRecord<L> {
    pub fn new(truth: L, score: f64) -> Self {
        Self { truth, score }
    }
}

/// One ROC sample taken at a single threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub threshold: f64,
    pub fpr: f64,
    pub tpr: f64,
}

impl CurvePoint {
    pub fn new(threshold: f64, fpr: f64, tpr: f64) -> Self {
        Self { threshold, fpr, tpr }
    }
}

/// One precision-recall sample taken at a single threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrPoint {
    pub threshold: f64,
    pub recall: f64,
    pub precision: f64,
}

impl PrPoint {
    pub fn new(threshold: f64, recall: f64, precision: f64) -> Self {
        Self {
            threshold,
            recall,
            precision,
        }
    }
}

/// How the threshold grid is laid out for a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPolicy {
    /// Evenly spaced thresholds from 0.0 to 1.0 inclusive.
    #[default]
    Uniform,
    /// Every distinct observed score plus the 0.0 and 1.0 endpoints.
    Observed,
}

/// Which curve a builder produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    #[default]
    Roc,
    Pr,
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveKind::Roc => write!(f, "roc"),
            CurveKind::Pr => write!(f, "pr"),
        }
    }
}

impl FromStr for CurveKind {
    type Err = CurveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "roc" => Ok(CurveKind::Roc),
            "pr" | "prc" => Ok(CurveKind::Pr),
            other => Err(CurveError::InvalidInput(format!(
                "unknown curve kind '{}'",
                other
            ))),
        }
    }
}

/// Shared sweep configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub grid: GridPolicy,
    /// Number of thresholds for the uniform grid.
    pub grid_points: usize,
    /// Fan the per-threshold tallies out across the rayon pool.
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            grid: GridPolicy::Uniform,
            grid_points: 101,
            parallel: false,
        }
    }
}

/// Finished curve of either kind, already in plotting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum Curve {
    Roc(Vec<CurvePoint>),
    Pr(Vec<PrPoint>),
}

impl Curve {
    pub fn kind(&self) -> CurveKind {
        match self {
            Curve::Roc(_) => CurveKind::Roc,
            Curve::Pr(_) => CurveKind::Pr,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Curve::Roc(points) => points.len(),
            Curve::Pr(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Trapezoidal area under the curve.
    pub fn area(&self) -> f64 {
        match self {
            Curve::Roc(points) => crate::sweep::integrate_auc(points),
            Curve::Pr(points) => crate::sweep::integrate_pr_auc(points),
        }
    }
}

/// Curve plus the class counts of the records it was swept over.
#[derive(Debug, Clone, PartialEq)]
pub struct SweptCurve {
    pub curve: Curve,
    pub balance: ClassBalance,
}

/// Common error type for curve construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type CurveResult<T> = Result<T, CurveError>;

/// Builds a curve from one record set with an explicitly declared label pair.
pub trait CurveBuilder<L> {
    fn kind(&self) -> CurveKind;
    fn config(&self) -> &SweepConfig;
    fn build(
        &self,
        records: &[PredictionRecord<L>],
        positive: &L,
        negative: &L,
    ) -> CurveResult<SweptCurve>;
}
