use crate::prelude::{
    Curve, CurveBuilder, CurveKind, CurvePoint, CurveResult, PredictionRecord, SweepConfig,
    SweptCurve,
};
use crate::sweep::confusion::LabelledScores;
use crate::sweep::grid::{validate_thresholds, ThresholdGrid};
use crate::sweep::sweep_tallies;
use crate::telemetry::log::LogManager;
use std::cmp::Ordering;

/// Sweeps `thresholds` over `records` and returns the ROC curve in plotting order.
///
/// A record is classified positive when `score >= threshold`. Rates whose
/// denominator is empty read as 0.0. The result is sorted by ascending fpr,
/// then ascending tpr, then descending threshold, so that ties in the scores
/// cannot produce spikes in a step plot.
///
/// Fails with `InvalidInput` if `records` is empty, the truth labels span
/// more than two classes, `positive_class` is not among them, a score lies
/// outside [0, 1], or `thresholds` is decreasing or out of range. A set made
/// only of `positive_class` gives a degenerate curve with fpr 0.0 throughout.
/// An empty threshold slice yields an empty curve.
pub fn build_roc_curve<L: PartialEq>(
    records: &[PredictionRecord<L>],
    positive_class: &L,
    thresholds: &[f64],
) -> CurveResult<Vec<CurvePoint>> {
    validate_thresholds(thresholds)?;
    let labelled = LabelledScores::infer(records, positive_class)?;
    Ok(roc_points(&labelled, thresholds, false))
}

/// Like [`build_roc_curve`] but against a declared label pair, so a record set
/// missing one class produces a degenerate curve instead of an error.
pub fn build_roc_curve_with_labels<L: PartialEq>(
    records: &[PredictionRecord<L>],
    positive_class: &L,
    negative_class: &L,
    thresholds: &[f64],
) -> CurveResult<Vec<CurvePoint>> {
    validate_thresholds(thresholds)?;
    let labelled = LabelledScores::declared(records, positive_class, negative_class)?;
    Ok(roc_points(&labelled, thresholds, false))
}

pub(crate) fn roc_points(
    labelled: &LabelledScores,
    thresholds: &[f64],
    parallel: bool,
) -> Vec<CurvePoint> {
    let mut points: Vec<CurvePoint> = sweep_tallies(&labelled.pairs, thresholds, parallel)
        .into_iter()
        .map(|(threshold, tally)| CurvePoint::new(threshold, tally.fpr(), tally.tpr()))
        .collect();
    sort_roc_points(&mut points);
    points
}

pub(crate) fn roc_order(a: &CurvePoint, b: &CurvePoint) -> Ordering {
    a.fpr
        .total_cmp(&b.fpr)
        .then(a.tpr.total_cmp(&b.tpr))
        .then(b.threshold.total_cmp(&a.threshold))
}

pub fn sort_roc_points(points: &mut [CurvePoint]) {
    points.sort_by(roc_order);
}

/// ROC builder driven by a [`SweepConfig`].
#[derive(Debug, Clone, Default)]
pub struct RocBuilder {
    config: SweepConfig,
    logger: LogManager,
}

impl RocBuilder {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            logger: LogManager::new("roc"),
        }
    }
}

impl<L: PartialEq> CurveBuilder<L> for RocBuilder {
    fn kind(&self) -> CurveKind {
        CurveKind::Roc
    }

    fn config(&self) -> &SweepConfig {
        &self.config
    }

    fn build(
        &self,
        records: &[PredictionRecord<L>],
        positive: &L,
        negative: &L,
    ) -> CurveResult<SweptCurve> {
        let labelled = LabelledScores::declared(records, positive, negative)?;
        let grid = ThresholdGrid::from_config(&self.config, records)?;
        let points = roc_points(&labelled, grid.values(), self.config.parallel);
        self.logger.debug(&format!(
            "swept {} thresholds over {} records",
            grid.len(),
            records.len()
        ));
        Ok(SweptCurve {
            curve: Curve::Roc(points),
            balance: labelled.balance,
        })
    }
}
