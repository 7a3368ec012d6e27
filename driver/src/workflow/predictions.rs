use anyhow::Context;
use roccore::evaluation::Fold;
use roccore::prelude::PredictionRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_FOLD: &str = "all";

/// One row of a predictions file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaggedPrediction {
    pub truth: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fold: Option<String>,
}

pub fn load_predictions<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<TaggedPrediction>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading predictions {}", path_ref.display()))?;
    let rows: Vec<TaggedPrediction> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing predictions {}", path_ref.display()))?;
    Ok(rows)
}

pub fn save_predictions<P: AsRef<Path>>(path: P, rows: &[TaggedPrediction]) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(rows).context("serializing predictions")?;
    fs::write(path_ref, json)
        .with_context(|| format!("writing predictions {}", path_ref.display()))?;
    Ok(())
}

/// Rows without a fold tag land in the `all` fold.
pub fn into_folds(rows: Vec<TaggedPrediction>) -> Vec<Fold<String>> {
    Fold::group(rows.into_iter().map(|row| {
        let fold = row.fold.unwrap_or_else(|| DEFAULT_FOLD.to_string());
        (fold, PredictionRecord::new(row.truth, row.score))
    }))
}

/// First truth label that differs from `positive`.
pub fn infer_negative(rows: &[TaggedPrediction], positive: &str) -> Option<String> {
    rows.iter()
        .find(|row| row.truth != positive)
        .map(|row| row.truth.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(truth: &str, score: f64, fold: Option<&str>) -> TaggedPrediction {
        TaggedPrediction {
            truth: truth.into(),
            score,
            fold: fold.map(str::to_string),
        }
    }

    #[test]
    fn untagged_rows_share_default_fold() {
        let folds = into_folds(vec![
            row("pos", 0.9, None),
            row("neg", 0.2, Some("cv-2")),
            row("neg", 0.1, None),
        ]);
        assert_eq!(folds.len(), 2);
        assert_eq!(folds[0].name, "all");
        assert_eq!(folds[0].records.len(), 2);
        assert_eq!(folds[1].name, "cv-2");
    }

    #[test]
    fn negative_is_inferred_from_rows() {
        let rows = vec![row("M", 0.9, None), row("R", 0.3, None)];
        assert_eq!(infer_negative(&rows, "M").as_deref(), Some("R"));
        assert_eq!(infer_negative(&rows[..1], "M"), None);
    }

    #[test]
    fn saved_predictions_load_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/predictions.json");
        let rows = vec![row("pos", 0.75, Some("f1")), row("neg", 0.25, None)];
        save_predictions(&path, &rows).unwrap();
        assert_eq!(load_predictions(&path).unwrap(), rows);
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_predictions(&path).unwrap_err();
        assert!(err.to_string().contains("parsing predictions"));
    }
}
