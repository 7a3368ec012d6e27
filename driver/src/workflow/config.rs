use anyhow::Context;
use roccore::prelude::{CurveKind, GridPolicy, SweepConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepSettings {
    pub positive: String,
    /// Inferred from the predictions when absent.
    #[serde(default)]
    pub negative: Option<String>,
    #[serde(default)]
    pub curve: CurveKind,
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl SweepSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading sweep config {}", path_ref.display()))?;
        let config: SweepSettings = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing sweep config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        positive: String,
        negative: Option<String>,
        curve: CurveKind,
        grid_points: usize,
        observed_grid: bool,
        parallel: bool,
    ) -> Self {
        let grid = if observed_grid {
            GridPolicy::Observed
        } else {
            GridPolicy::Uniform
        };
        Self {
            positive,
            negative,
            curve,
            sweep: SweepConfig {
                grid,
                grid_points,
                parallel,
            },
        }
    }

    pub fn to_sweep_config(&self) -> SweepConfig {
        self.sweep.clone()
    }
}
