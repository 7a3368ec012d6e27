use crate::workflow::predictions::TaggedPrediction;
use anyhow::bail;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating synthetic classifier output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub records: usize,
    pub folds: usize,
    pub positive_rate: f64,
    /// Distance between the class means on the logit scale.
    pub separation: f64,
    pub noise: f64,
    /// Round scores to this many decimals to provoke ties.
    pub decimals: Option<u32>,
    pub seed: u64,
    pub positive: String,
    pub negative: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            records: 200,
            folds: 1,
            positive_rate: 0.5,
            separation: 3.0,
            noise: 2.0,
            decimals: None,
            seed: 0,
            positive: "pos".into(),
            negative: "neg".into(),
        }
    }
}

impl GeneratorConfig {
    fn normalized_folds(&self) -> usize {
        self.folds.max(1)
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Beyond this an f64 score carries no further decimal digits.
const MAX_DECIMALS: u32 = 15;

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * scale).round() / scale
}

/// Scores are logistic of a class-shifted, uniformly jittered logit, so they
/// always fall inside [0, 1]. Each fold receives the same class split.
pub fn build_predictions(config: &GeneratorConfig) -> anyhow::Result<Vec<TaggedPrediction>> {
    if !(0.0..=1.0).contains(&config.positive_rate) {
        bail!("positive_rate {} outside [0, 1]", config.positive_rate);
    }
    if !config.separation.is_finite() {
        bail!("separation {} is not finite", config.separation);
    }
    if !config.noise.is_finite() || config.noise < 0.0 {
        bail!("noise must be finite and non-negative");
    }
    if let Some(decimals) = config.decimals {
        if decimals > MAX_DECIMALS {
            bail!("decimals {} exceeds {}", decimals, MAX_DECIMALS);
        }
    }

    let folds = config.normalized_folds();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rows = Vec::with_capacity(config.records);

    for fold_index in 0..folds {
        let fold_len = config.records / folds + usize::from(fold_index < config.records % folds);
        let positives = (fold_len as f64 * config.positive_rate).round() as usize;
        let fold = (folds > 1).then(|| format!("fold-{}", fold_index + 1));

        for record_index in 0..fold_len {
            let is_positive = record_index < positives;
            let shift = if is_positive {
                config.separation / 2.0
            } else {
                -config.separation / 2.0
            };
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            let mut score = logistic(shift + jitter);
            if let Some(decimals) = config.decimals {
                score = round_to(score, decimals);
            }
            let truth = if is_positive {
                config.positive.clone()
            } else {
                config.negative.clone()
            };
            rows.push(TaggedPrediction {
                truth,
                score,
                fold: fold.clone(),
            });
        }
    }

    Ok(rows)
}
