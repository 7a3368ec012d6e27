use crate::prelude::{CurveError, CurveResult, GridPolicy, PredictionRecord, SweepConfig};

/// Validated, non-decreasing sequence of thresholds inside [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdGrid {
    values: Vec<f64>,
}

impl ThresholdGrid {
    /// `points` evenly spaced thresholds from 0.0 to 1.0 inclusive.
    pub fn uniform(points: usize) -> Self {
        let values = match points {
            0 => Vec::new(),
            1 => vec![0.0],
            n => {
                let last = (n - 1) as f64;
                (0..n).map(|i| i as f64 / last).collect()
            }
        };
        Self { values }
    }

    /// Distinct observed scores, widened to include both endpoints.
    pub fn observed<L>(records: &[PredictionRecord<L>]) -> CurveResult<Self> {
        let mut values = Vec::with_capacity(records.len() + 2);
        values.push(0.0);
        for record in records {
            validate_score(record.score)?;
            values.push(record.score);
        }
        values.push(1.0);
        values.sort_by(f64::total_cmp);
        values.dedup();
        Ok(Self { values })
    }

    pub fn from_config<L>(
        config: &SweepConfig,
        records: &[PredictionRecord<L>],
    ) -> CurveResult<Self> {
        match config.grid {
            GridPolicy::Uniform => Ok(Self::uniform(config.grid_points)),
            GridPolicy::Observed => Self::observed(records),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub(crate) fn validate_score(score: f64) -> CurveResult<()> {
    if !(0.0..=1.0).contains(&score) {
        return Err(CurveError::InvalidInput(format!(
            "score {} outside [0, 1]",
            score
        )));
    }
    Ok(())
}

pub(crate) fn validate_thresholds(thresholds: &[f64]) -> CurveResult<()> {
    for (idx, &value) in thresholds.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(CurveError::InvalidInput(format!(
                "threshold {} at position {} outside [0, 1]",
                value, idx
            )));
        }
    }
    if let Some(idx) = thresholds.windows(2).position(|pair| pair[1] < pair[0]) {
        return Err(CurveError::InvalidInput(format!(
            "thresholds decrease at position {}",
            idx + 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_grid_spans_unit_interval() {
        let grid = ThresholdGrid::uniform(101);
        assert_eq!(grid.len(), 101);
        assert_eq!(grid.values()[0], 0.0);
        assert_eq!(grid.values()[50], 0.5);
        assert_eq!(grid.values()[100], 1.0);
    }

    #[test]
    fn uniform_grid_small_sizes() {
        assert!(ThresholdGrid::uniform(0).is_empty());
        assert_eq!(ThresholdGrid::uniform(1).values(), &[0.0]);
        assert_eq!(ThresholdGrid::uniform(2).values(), &[0.0, 1.0]);
    }

    #[test]
    fn observed_grid_dedups_and_adds_endpoints() {
        let records = vec![
            PredictionRecord::new("a", 0.4),
            PredictionRecord::new("b", 0.9),
            PredictionRecord::new("a", 0.4),
            PredictionRecord::new("b", 1.0),
        ];
        let grid = ThresholdGrid::observed(&records).unwrap();
        assert_eq!(grid.values(), &[0.0, 0.4, 0.9, 1.0]);
    }

    #[test]
    fn thresholds_must_be_non_decreasing_and_in_range() {
        assert!(validate_thresholds(&[0.0, 0.5, 0.5, 1.0]).is_ok());
        assert!(validate_thresholds(&[0.5, 0.2]).is_err());
        assert!(validate_thresholds(&[0.0, 1.5]).is_err());
        assert!(validate_thresholds(&[f64::NAN]).is_err());
    }

    #[test]
    fn from_config_follows_policy() {
        let records = vec![PredictionRecord::new(1, 0.25), PredictionRecord::new(0, 0.75)];
        let uniform = SweepConfig {
            grid_points: 5,
            ..Default::default()
        };
        assert_eq!(
            ThresholdGrid::from_config(&uniform, &records).unwrap().len(),
            5
        );

        let observed = SweepConfig {
            grid: GridPolicy::Observed,
            ..Default::default()
        };
        assert_eq!(
            ThresholdGrid::from_config(&observed, &records)
                .unwrap()
                .values(),
            &[0.0, 0.25, 0.75, 1.0]
        );
    }
}
