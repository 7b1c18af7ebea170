use crate::evaluate::{EvalParams, DEFAULT_BINS};
use crate::mask::SecondaryAxis;
use crate::metrics::RecallMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct EvaluateToolConfig {
    /// Primary scalar volume (`.nhdr` header or flat u8 dump).
    pub volume: PathBuf,
    /// Gradient-magnitude volume co-registered with `volume`.
    pub gradient: PathBuf,
    /// Delimited table with `birth` and `death` columns.
    pub pairs: PathBuf,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub output: EvaluateOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub bins: u32,
    pub secondary_axis: SecondaryAxis,
    pub recall_mode: RecallMode,
    /// Drop pairs with `death - birth` below this before evaluating.
    pub min_persistence: Option<f64>,
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            secondary_axis: SecondaryAxis::default(),
            recall_mode: RecallMode::default(),
            min_persistence: None,
            parallel: true,
        }
    }
}

impl EvaluationConfig {
    pub fn to_eval_params(&self) -> EvalParams {
        EvalParams {
            bins: self.bins,
            secondary_axis: self.secondary_axis,
            recall_mode: self.recall_mode,
            parallel: self.parallel,
        }
    }

    pub fn min_persistence(&self) -> Option<f64> {
        self.min_persistence.filter(|v| v.is_finite())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EvaluateOutputConfig {
    #[serde(rename = "metrics_csv")]
    pub metrics_csv: PathBuf,
    #[serde(rename = "report_json")]
    pub report_json: Option<PathBuf>,
}

impl Default for EvaluateOutputConfig {
    fn default() -> Self {
        Self {
            metrics_csv: PathBuf::from("metrics.csv"),
            report_json: None,
        }
    }
}

pub fn parse_config(text: &str) -> Result<EvaluateToolConfig, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

pub fn load_config(path: &Path) -> Result<EvaluateToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_takes_defaults() {
        let cfg = parse_config(
            r#"{ "volume": "scalar_volume.bin", "gradient": "gradient_volume.bin", "pairs": "pairs.csv" }"#,
        )
        .expect("config");
        let params = cfg.evaluation.to_eval_params();
        assert_eq!(params.bins, 256);
        assert_eq!(params.secondary_axis, SecondaryAxis::Flipped);
        assert_eq!(params.recall_mode, RecallMode::BoxDenominator);
        assert!(params.parallel);
        assert_eq!(cfg.output.metrics_csv, PathBuf::from("metrics.csv"));
        assert!(cfg.output.report_json.is_none());
        assert!(cfg.evaluation.min_persistence().is_none());
    }

    #[test]
    fn evaluation_section_overrides() {
        let cfg = parse_config(
            r#"{
                "volume": "v.nhdr", "gradient": "g.nhdr", "pairs": "p.csv",
                "evaluation": {
                    "bins": 64,
                    "secondary_axis": "identity",
                    "recall_mode": "feature_denominator",
                    "min_persistence": 10,
                    "parallel": false
                },
                "output": { "metrics_csv": "out/m.csv", "report_json": "out/r.json" }
            }"#,
        )
        .expect("config");
        let params = cfg.evaluation.to_eval_params();
        assert_eq!(params.bins, 64);
        assert_eq!(params.secondary_axis, SecondaryAxis::Identity);
        assert_eq!(params.recall_mode, RecallMode::FeatureDenominator);
        assert!(!params.parallel);
        assert_eq!(cfg.evaluation.min_persistence(), Some(10.0));
        assert_eq!(cfg.output.report_json, Some(PathBuf::from("out/r.json")));
    }

    #[test]
    fn missing_input_path_is_an_error() {
        assert!(parse_config(r#"{ "volume": "v", "gradient": "g" }"#).is_err());
    }
}
