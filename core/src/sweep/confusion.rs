use crate::math::StatsHelper;
use crate::prelude::{CurveError, CurveResult, PredictionRecord};
use crate::sweep::grid::validate_score;
use serde::{Deserialize, Serialize};

/// Confusion counts for a single threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionTally {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl ConfusionTally {
    /// Tallies `(is_positive, score)` pairs against an inclusive threshold.
    pub fn at_threshold(labelled: &[(bool, f64)], threshold: f64) -> Self {
        let mut tally = Self::default();
        for &(is_positive, score) in labelled {
            match (is_positive, score >= threshold) {
                (true, true) => tally.tp += 1,
                (true, false) => tally.fn_ += 1,
                (false, true) => tally.fp += 1,
                (false, false) => tally.tn += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Sensitivity / recall.
    pub fn tpr(&self) -> f64 {
        StatsHelper::rate(self.tp, self.tp + self.fn_)
    }

    pub fn fpr(&self) -> f64 {
        StatsHelper::rate(self.fp, self.fp + self.tn)
    }

    /// Precision.
    pub fn ppv(&self) -> f64 {
        StatsHelper::rate(self.tp, self.tp + self.fp)
    }
}

/// Ground-truth class counts of a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBalance {
    pub positives: usize,
    pub negatives: usize,
}

impl ClassBalance {
    /// One of the two classes has no observations.
    pub fn is_degenerate(&self) -> bool {
        self.positives == 0 || self.negatives == 0
    }
}

/// Record set reduced to `(is_positive, score)` after validation.
#[derive(Debug, Clone)]
pub struct LabelledScores {
    pub pairs: Vec<(bool, f64)>,
    pub balance: ClassBalance,
}

impl LabelledScores {
    /// Requires at most two distinct truth labels, one of them `positive`.
    ///
    /// A set holding only `positive` is accepted and yields an fpr of 0.0 at
    /// every threshold. A set without `positive` is rejected, since its
    /// negative class cannot be told apart from an unknown label.
    pub fn infer<L: PartialEq>(
        records: &[PredictionRecord<L>],
        positive: &L,
    ) -> CurveResult<Self> {
        if records.is_empty() {
            return Err(CurveError::InvalidInput("no prediction records".into()));
        }

        let mut distinct: Vec<&L> = Vec::with_capacity(2);
        for record in records {
            if !distinct.contains(&&record.truth) {
                distinct.push(&record.truth);
                if distinct.len() > 2 {
                    return Err(CurveError::InvalidInput(
                        "truth labels span more than two classes".into(),
                    ));
                }
            }
        }
        if !distinct.contains(&positive) {
            return Err(CurveError::InvalidInput(
                "positive class not among observed labels".into(),
            ));
        }

        Self::collect(records, positive)
    }

    /// Accepts one-class record sets as long as every truth is in the declared pair.
    pub fn declared<L: PartialEq>(
        records: &[PredictionRecord<L>],
        positive: &L,
        negative: &L,
    ) -> CurveResult<Self> {
        if records.is_empty() {
            return Err(CurveError::InvalidInput("no prediction records".into()));
        }
        if positive == negative {
            return Err(CurveError::InvalidInput(
                "positive and negative class must differ".into(),
            ));
        }
        if let Some(idx) = records
            .iter()
            .position(|r| r.truth != *positive && r.truth != *negative)
        {
            return Err(CurveError::InvalidInput(format!(
                "record {} carries a label outside the declared pair",
                idx
            )));
        }

        Self::collect(records, positive)
    }

    fn collect<L: PartialEq>(records: &[PredictionRecord<L>], positive: &L) -> CurveResult<Self> {
        let mut balance = ClassBalance::default();
        let mut pairs = Vec::with_capacity(records.len());
        for record in records {
            validate_score(record.score)?;
            let is_positive = record.truth == *positive;
            if is_positive {
                balance.positives += 1;
            } else {
                balance.negatives += 1;
            }
            pairs.push((is_positive, record.score));
        }
        Ok(Self { pairs, balance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<PredictionRecord<&'static str>> {
        vec![
            PredictionRecord::new("pos", 0.9),
            PredictionRecord::new("pos", 0.4),
            PredictionRecord::new("neg", 0.6),
            PredictionRecord::new("neg", 0.1),
        ]
    }

    #[test]
    fn tally_counts_sum_to_total() {
        let labelled = LabelledScores::infer(&records(), &"pos").unwrap();
        for threshold in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let tally = ConfusionTally::at_threshold(&labelled.pairs, threshold);
            assert_eq!(tally.total(), 4);
        }
    }

    #[test]
    fn tally_at_midpoint_matches_hand_count() {
        let labelled = LabelledScores::infer(&records(), &"pos").unwrap();
        let tally = ConfusionTally::at_threshold(&labelled.pairs, 0.5);
        assert_eq!(
            tally,
            ConfusionTally {
                tp: 1,
                fp: 1,
                tn: 1,
                fn_: 1
            }
        );
        assert_eq!(tally.tpr(), 0.5);
        assert_eq!(tally.fpr(), 0.5);
        assert_eq!(tally.ppv(), 0.5);
    }

    #[test]
    fn score_on_threshold_counts_as_positive() {
        let tally = ConfusionTally::at_threshold(&[(true, 0.5)], 0.5);
        assert_eq!(tally.tp, 1);
        assert_eq!(tally.fn_, 0);
    }

    #[test]
    fn infer_rejects_malformed_sets() {
        let empty: Vec<PredictionRecord<&str>> = Vec::new();
        assert!(LabelledScores::infer(&empty, &"pos").is_err());

        let three = vec![
            PredictionRecord::new("a", 0.1),
            PredictionRecord::new("b", 0.2),
            PredictionRecord::new("c", 0.3),
        ];
        assert!(LabelledScores::infer(&three, &"a").is_err());

        let one = vec![PredictionRecord::new("a", 0.1)];
        assert!(LabelledScores::infer(&one, &"b").is_err());

        assert!(LabelledScores::infer(&records(), &"other").is_err());
    }

    #[test]
    fn infer_rejects_out_of_range_scores() {
        let bad = vec![
            PredictionRecord::new("pos", 1.2),
            PredictionRecord::new("neg", 0.1),
        ];
        assert!(matches!(
            LabelledScores::infer(&bad, &"pos"),
            Err(CurveError::InvalidInput(_))
        ));
    }

    #[test]
    fn infer_accepts_positive_only_set() {
        let only_pos = vec![
            PredictionRecord::new("pos", 0.2),
            PredictionRecord::new("pos", 0.7),
        ];
        let labelled = LabelledScores::infer(&only_pos, &"pos").unwrap();
        assert_eq!(
            labelled.balance,
            ClassBalance {
                positives: 2,
                negatives: 0
            }
        );
    }

    #[test]
    fn declared_accepts_single_class() {
        let only_pos = vec![
            PredictionRecord::new("pos", 0.3),
            PredictionRecord::new("pos", 0.8),
        ];
        let labelled = LabelledScores::declared(&only_pos, &"pos", &"neg").unwrap();
        assert!(labelled.balance.is_degenerate());
        assert_eq!(labelled.balance.positives, 2);
    }

    #[test]
    fn declared_rejects_foreign_labels() {
        let mixed = vec![
            PredictionRecord::new("pos", 0.3),
            PredictionRecord::new("maybe", 0.8),
        ];
        assert!(LabelledScores::declared(&mixed, &"pos", &"neg").is_err());
        assert!(LabelledScores::declared(&mixed, &"pos", &"pos").is_err());
    }
}
