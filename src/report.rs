//! Per-pair result records, aggregate summary and the tabular sink.
use crate::metrics::OverlapMetrics;
use crate::volume::io::ensure_parent_dir;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Column order of the metrics table.
pub const METRICS_COLUMNS: [&str; 6] = ["birth", "death", "J_arc", "J_box", "precision", "recall"];

/// Persistence thresholds reported in the summary curve.
pub const PERSISTENCE_CURVE_THRESHOLDS: [i64; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// One output row: the truncated pair and its four scores.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MetricsRecord {
    pub birth: i64,
    pub death: i64,
    #[serde(flatten)]
    pub metrics: OverlapMetrics,
}

impl MetricsRecord {
    pub fn persistence(&self) -> i64 {
        self.death.saturating_sub(self.birth)
    }
}

/// Render records as delimited text with the fixed six-column header.
pub fn format_metrics_csv(records: &[MetricsRecord]) -> String {
    let mut out = METRICS_COLUMNS.join(",");
    out.push('\n');
    for r in records {
        let m = &r.metrics;
        // {:?} keeps a trailing ".0" on integral floats
        out.push_str(&format!(
            "{},{},{:?},{:?},{:?},{:?}\n",
            r.birth, r.death, m.j_arc, m.j_box, m.precision, m.recall
        ));
    }
    out
}

/// Write the metrics table to `path`, creating parent directories.
pub fn write_metrics_csv(path: &Path, records: &[MetricsRecord]) -> Result<(), String> {
    ensure_parent_dir(path)?;
    fs::write(path, format_metrics_csv(records))
        .map_err(|e| format!("Failed to write metrics {}: {e}", path.display()))
}

/// Number of features whose persistence reaches a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub threshold: i64,
    pub features: usize,
}

/// Aggregate view over a batch of records.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub pairs: usize,
    /// Rows whose interval selected no voxel (all scores zero).
    pub degenerate: usize,
    pub mean: OverlapMetrics,
    pub persistence_curve: Vec<CurvePoint>,
}

impl MetricsSummary {
    pub fn from_records(records: &[MetricsRecord]) -> Self {
        let pairs = records.len();
        let degenerate = records.iter().filter(|r| r.metrics.is_zero()).count();
        let mut mean = OverlapMetrics::zero();
        if pairs > 0 {
            for r in records {
                mean.j_arc += r.metrics.j_arc;
                mean.j_box += r.metrics.j_box;
                mean.precision += r.metrics.precision;
                mean.recall += r.metrics.recall;
            }
            let n = pairs as f64;
            mean.j_arc /= n;
            mean.j_box /= n;
            mean.precision /= n;
            mean.recall /= n;
        }
        let persistence_curve = PERSISTENCE_CURVE_THRESHOLDS
            .iter()
            .map(|&threshold| CurvePoint {
                threshold,
                features: records
                    .iter()
                    .filter(|r| r.persistence() >= threshold)
                    .count(),
            })
            .collect();
        Self {
            pairs,
            degenerate,
            mean,
            persistence_curve,
        }
    }
}
