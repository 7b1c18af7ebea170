#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod evaluate;
pub mod pairs;
pub mod report;
pub mod volume;

// Building blocks of a single-pair evaluation.
pub mod interval;
pub mod mask;
pub mod metrics;

// --- High-level re-exports -------------------------------------------------

pub use crate::evaluate::{EvalError, EvalParams, Evaluator};
pub use crate::pairs::{PairTable, PersistencePair};
pub use crate::report::{MetricsRecord, MetricsSummary};

pub use crate::interval::{normalize, BinInterval};
pub use crate::mask::{build_masks, MaskOutcome, SecondaryAxis, VoxelMask};
pub use crate::metrics::{score, OverlapCounts, OverlapMetrics, RecallMode};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use tf_reprojection::prelude::*;
///
/// # fn main() {
/// let scalar = vec![0u8; 64 * 64 * 64];
/// let gradient = vec![0u8; 64 * 64 * 64];
/// let pairs = [PersistencePair::new(12.0, 80.0)];
///
/// let evaluator = Evaluator::new(EvalParams::default());
/// let records = evaluator
///     .evaluate_batch(&VolumeU8::flat(&scalar), &VolumeU8::flat(&gradient), &pairs)
///     .unwrap();
/// println!("J_arc={:.3}", records[0].metrics.j_arc);
/// # }
/// ```
pub mod prelude {
    pub use crate::volume::{VolumeU8, VolumeView};
    pub use crate::{EvalParams, Evaluator, MetricsRecord, PersistencePair};
}
