//! Run report written next to the metrics table.
//!
//! `EvaluationReport` records what was evaluated (input volumes and pair
//! count), with which parameters, the aggregate scores and where the time
//! went.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::evaluate::EvalParams;
use crate::report::MetricsSummary;
use crate::volume::VolumeStats;
use serde::Serialize;
use std::path::PathBuf;

/// Description of the inputs of one batch run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub volume: PathBuf,
    pub gradient: PathBuf,
    pub pairs: PathBuf,
    pub resolution: Option<[usize; 3]>,
    pub pairs_read: usize,
    pub pairs_evaluated: usize,
    pub volume_stats: VolumeStats,
    pub gradient_stats: VolumeStats,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub input: InputDescriptor,
    pub params: EvalParams,
    pub summary: MetricsSummary,
    pub timing: TimingBreakdown,
}
