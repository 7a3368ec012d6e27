pub mod auc;
pub mod confusion;
pub mod grid;
pub mod prc;
pub mod roc;

pub use auc::{integrate_auc, integrate_pr_auc, youden_optimal};
pub use confusion::{ClassBalance, ConfusionTally, LabelledScores};
pub use grid::ThresholdGrid;
pub use prc::{build_pr_curve, build_pr_curve_with_labels, PrBuilder};
pub use roc::{build_roc_curve, build_roc_curve_with_labels, RocBuilder};

use rayon::prelude::*;

/// Grids shorter than this are always swept on the calling thread.
const PARALLEL_MIN_THRESHOLDS: usize = 64;

/// Confusion tally for every threshold, in grid order.
pub(crate) fn sweep_tallies(
    labelled: &[(bool, f64)],
    thresholds: &[f64],
    parallel: bool,
) -> Vec<(f64, ConfusionTally)> {
    if parallel && thresholds.len() >= PARALLEL_MIN_THRESHOLDS {
        thresholds
            .par_iter()
            .map(|&t| (t, ConfusionTally::at_threshold(labelled, t)))
            .collect()
    } else {
        thresholds
            .iter()
            .map(|&t| (t, ConfusionTally::at_threshold(labelled, t)))
            .collect()
    }
}
