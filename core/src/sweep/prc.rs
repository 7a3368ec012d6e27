use crate::prelude::{
    Curve, CurveBuilder, CurveKind, CurveResult, PrPoint, PredictionRecord, SweepConfig,
    SweptCurve,
};
use crate::sweep::confusion::LabelledScores;
use crate::sweep::grid::{validate_thresholds, ThresholdGrid};
use crate::sweep::sweep_tallies;
use crate::telemetry::log::LogManager;
use std::cmp::Ordering;

/// Precision-recall counterpart of [`build_roc_curve`](crate::sweep::build_roc_curve).
///
/// Validation and the inclusive threshold rule are identical. Precision reads
/// as 0.0 at thresholds where nothing is predicted positive. Points are sorted
/// by ascending recall, then descending threshold.
pub fn build_pr_curve<L: PartialEq>(
    records: &[PredictionRecord<L>],
    positive_class: &L,
    thresholds: &[f64],
) -> CurveResult<Vec<PrPoint>> {
    validate_thresholds(thresholds)?;
    let labelled = LabelledScores::infer(records, positive_class)?;
    Ok(pr_points(&labelled, thresholds, false))
}

pub fn build_pr_curve_with_labels<L: PartialEq>(
    records: &[PredictionRecord<L>],
    positive_class: &L,
    negative_class: &L,
    thresholds: &[f64],
) -> CurveResult<Vec<PrPoint>> {
    validate_thresholds(thresholds)?;
    let labelled = LabelledScores::declared(records, positive_class, negative_class)?;
    Ok(pr_points(&labelled, thresholds, false))
}

pub(crate) fn pr_points(
    labelled: &LabelledScores,
    thresholds: &[f64],
    parallel: bool,
) -> Vec<PrPoint> {
    let mut points: Vec<PrPoint> = sweep_tallies(&labelled.pairs, thresholds, parallel)
        .into_iter()
        .map(|(threshold, tally)| PrPoint::new(threshold, tally.tpr(), tally.ppv()))
        .collect();
    sort_pr_points(&mut points);
    points
}

pub(crate) fn pr_order(a: &PrPoint, b: &PrPoint) -> Ordering {
    a.recall
        .total_cmp(&b.recall)
        .then(b.threshold.total_cmp(&a.threshold))
}

pub fn sort_pr_points(points: &mut [PrPoint]) {
    points.sort_by(pr_order);
}

#[derive(Debug, Clone, Default)]
pub struct PrBuilder {
    config: SweepConfig,
    logger: LogManager,
}

impl PrBuilder {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            logger: LogManager::new("pr"),
        }
    }
}

impl<L: PartialEq> CurveBuilder<L> for PrBuilder {
    fn kind(&self) -> CurveKind {
        CurveKind::Pr
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
        let points = pr_points(&labelled, grid.values(), self.config.parallel);
        self.logger.debug(&format!(
            "swept {} thresholds over {} records",
            grid.len(),
            records.len()
        ));
        Ok(SweptCurve {
            curve: Curve::Pr(points),
            balance: labelled.balance,
        })
    }
}
