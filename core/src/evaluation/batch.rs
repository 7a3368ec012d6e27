use crate::evaluation::fold::{Fold, FoldReport};
use crate::math::StatsHelper;
use crate::prelude::{Curve, CurveBuilder, CurveError, CurveKind, CurveResult, SweptCurve};
use crate::sweep::youden_optimal;
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use serde::Serialize;

/// Aggregate AUC over the folds that produced a usable curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub folds: usize,
    pub failed: usize,
    pub degenerate: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_auc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_auc: Option<f64>,
}

impl BatchSummary {
    fn from_reports(reports: &[FoldReport]) -> Self {
        let failed = reports.iter().filter(|r| !r.is_ok()).count();
        let degenerate = reports.iter().filter(|r| r.degenerate).count();
        let aucs: Vec<f64> = reports
            .iter()
            .filter(|r| r.is_ok() && !r.degenerate)
            .filter_map(|r| r.auc)
            .collect();
        let (mean_auc, std_auc) = if aucs.is_empty() {
            (None, None)
        } else {
            (
                Some(StatsHelper::mean(&aucs)),
                Some(StatsHelper::std_dev(&aucs)),
            )
        };
        Self {
            folds: reports.len(),
            failed,
            degenerate,
            mean_auc,
            std_auc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub kind: CurveKind,
    pub folds: Vec<FoldReport>,
    pub summary: BatchSummary,
    pub metrics: MetricsSnapshot,
}

impl BatchReport {
    pub fn to_json_pretty(&self) -> CurveResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| CurveError::Internal(format!("serializing report: {}", err)))
    }
}

/// Sweeps every fold of a resampling run against one declared label pair.
///
/// A fold that fails validation is reported with its error and the batch
/// moves on; a fold missing one class is flagged as degenerate and kept out
/// of the AUC summary.
pub struct FoldEvaluator<B, L> {
    builder: B,
    positive: L,
    negative: L,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<B, L> FoldEvaluator<B, L>
where
    B: CurveBuilder<L>,
    L: PartialEq,
{
    pub fn new(builder: B, positive: L, negative: L) -> Self {
        Self {
            builder,
            positive,
            negative,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("evaluation"),
        }
    }

    pub fn evaluate_fold(&self, fold: &Fold<L>) -> FoldReport {
        let SweptCurve { curve, balance } = match self
            .builder
            .build(&fold.records, &self.positive, &self.negative)
        {
            Ok(swept) => swept,
            Err(err) => {
                self.metrics.record_error();
                self.logger
                    .warn(&format!("fold '{}' rejected: {}", fold.name, err));
                return FoldReport::failed(&fold.name, fold.records.len(), err.to_string());
            }
        };
        self.metrics.record_sweep();

        let degenerate = balance.is_degenerate();
        if degenerate {
            self.metrics.record_degenerate();
            self.logger.warn(&format!(
                "fold '{}' is single-class ({} positives, {} negatives)",
                fold.name, balance.positives, balance.negatives
            ));
        }

        let best_threshold = match &curve {
            Curve::Roc(points) => youden_optimal(points).map(|p| p.threshold),
            Curve::Pr(_) => None,
        };
        let auc = curve.area();
        self.logger.record(&format!(
            "fold '{}' {} area {:.4} over {} points",
            fold.name,
            curve.kind(),
            auc,
            curve.len()
        ));

        FoldReport {
            fold: fold.name.clone(),
            records: fold.records.len(),
            balance: Some(balance),
            curve: Some(curve),
            auc: Some(auc),
            best_threshold,
            degenerate,
            error: None,
        }
    }

    pub fn evaluate(&self, folds: &[Fold<L>]) -> BatchReport {
        let config = self.builder.config();
        self.logger.debug(&format!(
            "{:?} grid ({} points), parallel {}",
            config.grid, config.grid_points, config.parallel
        ));
        let reports: Vec<FoldReport> = folds.iter().map(|fold| self.evaluate_fold(fold)).collect();
        let summary = BatchSummary::from_reports(&reports);
        if let Some(mean) = summary.mean_auc {
            self.logger.record(&format!(
                "{} folds, mean area {:.4}",
                summary.folds, mean
            ));
        }
        BatchReport {
            kind: self.builder.kind(),
            folds: reports,
            summary,
            metrics: self.metrics.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{PredictionRecord, SweepConfig};
    use crate::sweep::{ClassBalance, PrBuilder, RocBuilder};

    fn separable() -> Vec<PredictionRecord<String>> {
        vec![
            PredictionRecord::new("pos".to_string(), 0.9),
            PredictionRecord::new("pos".to_string(), 0.8),
            PredictionRecord::new("neg".to_string(), 0.2),
            PredictionRecord::new("neg".to_string(), 0.1),
        ]
    }

    fn evaluator() -> FoldEvaluator<RocBuilder, String> {
        FoldEvaluator::new(
            RocBuilder::new(SweepConfig::default()),
            "pos".to_string(),
            "neg".to_string(),
        )
    }

    #[test]
    fn batch_continues_past_bad_and_single_class_folds() {
        let folds = vec![
            Fold::new("good", separable()),
            Fold::new("empty", Vec::new()),
            Fold::new(
                "only-pos",
                vec![
                    PredictionRecord::new("pos".to_string(), 0.4),
                    PredictionRecord::new("pos".to_string(), 0.6),
                ],
            ),
            Fold::new(
                "foreign",
                vec![PredictionRecord::new("unknown".to_string(), 0.5)],
            ),
        ];

        let report = evaluator().evaluate(&folds);
        assert_eq!(report.folds.len(), 4);
        assert!(report.folds[0].is_ok());
        assert!(!report.folds[1].is_ok());
        assert!(report.folds[2].is_ok());
        assert!(report.folds[2].degenerate);
        assert!(!report.folds[3].is_ok());

        assert_eq!(report.summary.failed, 2);
        assert_eq!(report.summary.degenerate, 1);
        assert!((report.summary.mean_auc.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(report.summary.std_auc, Some(0.0));
        assert_eq!(
            report.metrics,
            MetricsSnapshot {
                sweeps: 2,
                errors: 2,
                degenerate: 1
            }
        );
    }

    #[test]
    fn identical_fold_areas_have_zero_spread() {
        // three folds with an area of 2/3 each
        let fold = || {
            vec![
                PredictionRecord::new("pos".to_string(), 0.9),
                PredictionRecord::new("neg".to_string(), 0.7),
                PredictionRecord::new("pos".to_string(), 0.5),
                PredictionRecord::new("neg".to_string(), 0.3),
                PredictionRecord::new("pos".to_string(), 0.2),
                PredictionRecord::new("neg".to_string(), 0.1),
            ]
        };
        let folds = vec![
            Fold::new("f1", fold()),
            Fold::new("f2", fold()),
            Fold::new("f3", fold()),
        ];
        let report = evaluator().evaluate(&folds);
        let first = report.folds[0].auc.unwrap();
        assert!(report.folds.iter().all(|r| r.auc == Some(first)));
        assert_eq!(report.summary.std_auc, Some(0.0));
        assert!((report.summary.mean_auc.unwrap() - first).abs() < 1e-12);
    }

    #[test]
    fn roc_fold_reports_youden_threshold() {
        let report = evaluator().evaluate_fold(&Fold::new("good", separable()));
        let best = report.best_threshold.unwrap();
        assert!(best > 0.2 && best <= 0.8);
        assert_eq!(
            report.balance,
            Some(ClassBalance {
                positives: 2,
                negatives: 2
            })
        );
    }

    #[test]
    fn pr_batch_has_no_best_threshold() {
        let evaluator = FoldEvaluator::new(
            PrBuilder::new(SweepConfig::default()),
            "pos".to_string(),
            "neg".to_string(),
        );
        let report = evaluator.evaluate(&[Fold::new("good", separable())]);
        assert_eq!(report.kind, CurveKind::Pr);
        assert!(report.folds[0].best_threshold.is_none());
        assert!(report.summary.mean_auc.is_some());
    }

    #[test]
    fn all_failed_batch_has_no_summary_auc() {
        let report = evaluator().evaluate(&[Fold::new("empty", Vec::new())]);
        assert!(report.summary.mean_auc.is_none());
        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\"failed\": 1"));
    }
}
