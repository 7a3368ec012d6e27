use crate::math::StatsHelper;
use crate::prelude::{CurvePoint, PrPoint};
use crate::sweep::prc::pr_order;
use crate::sweep::roc::roc_order;
use std::cmp::Ordering;

/// Trapezoidal area under an ROC curve.
///
/// Input that is not already in plotting order is sorted on a copy first, so
/// the result does not depend on the order the points arrive in. Fewer than
/// two points enclose no area.
pub fn integrate_auc(curve: &[CurvePoint]) -> f64 {
    let area =
        |points: &[CurvePoint]| StatsHelper::trapezoid(points.iter().map(|p| (p.fpr, p.tpr)));
    if is_sorted_by(curve, roc_order) {
        area(curve)
    } else {
        let mut sorted = curve.to_vec();
        sorted.sort_by(roc_order);
        area(&sorted)
    }
}

/// Trapezoidal area under a precision-recall curve, integrated over recall.
pub fn integrate_pr_auc(curve: &[PrPoint]) -> f64 {
    let area =
        |points: &[PrPoint]| StatsHelper::trapezoid(points.iter().map(|p| (p.recall, p.precision)));
    if is_sorted_by(curve, pr_order) {
        area(curve)
    } else {
        let mut sorted = curve.to_vec();
        sorted.sort_by(pr_order);
        area(&sorted)
    }
}

/// Point maximising Youden's J (`tpr - fpr`); the highest threshold wins ties.
pub fn youden_optimal(curve: &[CurvePoint]) -> Option<CurvePoint> {
    curve.iter().copied().max_by(|a, b| {
        (a.tpr - a.fpr)
            .total_cmp(&(b.tpr - b.fpr))
            .then(a.threshold.total_cmp(&b.threshold))
    })
}

fn is_sorted_by<T, F>(points: &[T], order: F) -> bool
where
    F: Fn(&T, &T) -> Ordering,
{
    points
        .windows(2)
        .all(|pair| order(&pair[0], &pair[1]) != Ordering::Greater)
}
