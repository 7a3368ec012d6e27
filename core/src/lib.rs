//! Threshold-sweep curve construction for binary classification results.
//!
//! Scores are swept against a threshold grid, a confusion tally is recomputed
//! at every step, and the derived rates are collected into monotone ROC or
//! precision-recall curves ready for step plotting and area integration.

pub mod evaluation;
pub mod math;
pub mod prelude;
pub mod sweep;
pub mod telemetry;

pub use prelude::{CurveBuilder, CurveError, CurvePoint, CurveResult, PrPoint, PredictionRecord};
pub use sweep::{build_pr_curve, build_roc_curve, integrate_auc, integrate_pr_auc};
