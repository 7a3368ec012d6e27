use crate::workflow::config::SweepSettings;
use crate::workflow::predictions::{infer_negative, into_folds, TaggedPrediction};
use anyhow::{bail, Context};
use log::info;
use roccore::evaluation::{BatchReport, FoldEvaluator};
use roccore::prelude::CurveKind;
use roccore::sweep::{PrBuilder, RocBuilder};

#[derive(Clone)]
pub struct Runner {
    settings: SweepSettings,
}

impl Runner {
    pub fn new(settings: SweepSettings) -> Self {
        Self { settings }
    }

    pub fn execute(&self, rows: Vec<TaggedPrediction>) -> anyhow::Result<BatchReport> {
        if rows.is_empty() {
            bail!("no predictions to evaluate");
        }

        let positive = self.settings.positive.clone();
        let negative = match &self.settings.negative {
            Some(label) => label.clone(),
            None => infer_negative(&rows, &positive).with_context(|| {
                format!("inferring negative class: every row is '{}'", positive)
            })?,
        };
        info!(
            "sweeping {} curve, positive '{}', negative '{}'",
            self.settings.curve, positive, negative
        );

        let folds = into_folds(rows);
        let sweep = self.settings.to_sweep_config();
        let report = match self.settings.curve {
            CurveKind::Roc => {
                FoldEvaluator::new(RocBuilder::new(sweep), positive, negative).evaluate(&folds)
            }
            CurveKind::Pr => {
                FoldEvaluator::new(PrBuilder::new(sweep), positive, negative).evaluate(&folds)
            }
        };
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_predictions, GeneratorConfig};

    fn row(truth: &str, score: f64, fold: &str) -> TaggedPrediction {
        TaggedPrediction {
            truth: truth.into(),
            score,
            fold: Some(fold.into()),
        }
    }

    #[test]
    fn runner_evaluates_generated_folds() {
        let generator = GeneratorConfig {
            records: 60,
            folds: 3,
            ..Default::default()
        };
        let rows = build_predictions(&generator).unwrap();
        let settings =
            SweepSettings::from_args("pos".into(), None, CurveKind::Roc, 101, false, false);
        let report = Runner::new(settings).execute(rows).unwrap();
        assert_eq!(report.summary.folds, 3);
        assert_eq!(report.summary.failed, 0);
        let mean = report.summary.mean_auc.unwrap();
        assert!(mean > 0.5 && mean <= 1.0);
    }

    #[test]
    fn runner_flags_single_class_fold() {
        let rows = vec![
            row("pos", 0.9, "a"),
            row("neg", 0.1, "a"),
            row("pos", 0.7, "b"),
        ];
        let settings =
            SweepSettings::from_args("pos".into(), None, CurveKind::Pr, 11, false, false);
        let report = Runner::new(settings).execute(rows).unwrap();
        assert_eq!(report.kind, CurveKind::Pr);
        assert!(!report.folds[0].degenerate);
        assert!(report.folds[1].degenerate);
    }

    #[test]
    fn runner_needs_a_negative_label() {
        let rows = vec![row("pos", 0.9, "a")];
        let settings =
            SweepSettings::from_args("pos".into(), None, CurveKind::Roc, 11, false, false);
        assert!(Runner::new(settings).execute(rows).is_err());
        let empty = SweepSettings::from_args("pos".into(), None, CurveKind::Roc, 11, false, false);
        assert!(Runner::new(empty).execute(Vec::new()).is_err());
    }
}
