use crate::prelude::{Curve, PredictionRecord};
use crate::sweep::ClassBalance;
use serde::{Deserialize, Serialize};

/// Prediction records of one resampling fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fold<L> {
    pub name: String,
    pub records: Vec<PredictionRecord<L>>,
}

impl<L> Fold<L> {
    pub fn new(name: impl Into<String>, records: Vec<PredictionRecord<L>>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Groups `(fold name, record)` pairs into folds in first-seen order.
    pub fn group<I>(tagged: I) -> Vec<Fold<L>>
    where
        I: IntoIterator<Item = (String, PredictionRecord<L>)>,
    {
        let mut folds: Vec<Fold<L>> = Vec::new();
        for (name, record) in tagged {
            match folds.iter_mut().find(|fold| fold.name == name) {
                Some(fold) => fold.records.push(record),
                None => folds.push(Fold::new(name, vec![record])),
            }
        }
        folds
    }
}

/// Outcome of sweeping a single fold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldReport {
    pub fold: String,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<ClassBalance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<Curve>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auc: Option<f64>,
    /// Youden-optimal threshold, ROC curves only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_threshold: Option<f64>,
    pub degenerate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FoldReport {
    pub fn failed(fold: &str, records: usize, error: String) -> Self {
        Self {
            fold: fold.to_string(),
            records,
            balance: None,
            curve: None,
            auc: None,
            best_threshold: None,
            degenerate: false,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
