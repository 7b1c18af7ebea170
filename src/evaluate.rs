//! Batch evaluation of persistence pairs against a pair of co-registered
//! volumes.
//!
//! Each row is independent: truncate the pair, normalize it into a bin
//! interval, build the feature and box masks, score them. Rows only share
//! read-only access to the two volumes, so with the `parallel` feature they
//! are fanned out over rayon and collected back in input order.
//!
//! ```no_run
//! use tf_reprojection::{EvalParams, Evaluator, PersistencePair};
//! use tf_reprojection::volume::VolumeU8;
//!
//! # fn example(scalar: &[u8], gradient: &[u8]) {
//! let evaluator = Evaluator::new(EvalParams::default());
//! let pairs = [PersistencePair::new(40.0, 90.0)];
//! let records = evaluator
//!     .evaluate_batch(&VolumeU8::flat(scalar), &VolumeU8::flat(gradient), &pairs)
//!     .expect("co-registered volumes");
//! println!("J_arc={:.3}", records[0].metrics.j_arc);
//! # }
//! ```
use crate::interval::normalize;
use crate::mask::{build_masks, SecondaryAxis};
use crate::metrics::{score_outcome, RecallMode};
use crate::pairs::{PairTable, PairTableError, PersistencePair};
use crate::report::MetricsRecord;
use crate::volume::VolumeView;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of transfer-function bins (the u8 value domain).
pub const DEFAULT_BINS: u32 = 256;

/// Conditions that abort a whole batch before any row is evaluated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("volume/gradient size mismatch: {primary} vs {secondary} voxels")]
    VolumeLengthMismatch { primary: usize, secondary: usize },
    #[error("bin count must be positive")]
    InvalidBins,
    #[error(transparent)]
    PairTable(#[from] PairTableError),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvalParams {
    /// Number of TF bins; should match the value domain of the volumes.
    pub bins: u32,
    pub secondary_axis: SecondaryAxis,
    pub recall_mode: RecallMode,
    /// Fan rows out over rayon when the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            secondary_axis: SecondaryAxis::Flipped,
            recall_mode: RecallMode::BoxDenominator,
            parallel: true,
        }
    }
}

/// Stateless per-pair scorer.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    params: EvalParams,
}

impl Evaluator {
    pub fn new(params: EvalParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EvalParams {
        &self.params
    }

    /// Score a single pair under the same preconditions as a batch.
    pub fn evaluate_pair(
        &self,
        primary: &[u8],
        secondary: &[u8],
        pair: &PersistencePair,
    ) -> Result<MetricsRecord, EvalError> {
        self.check_inputs(primary.len(), secondary.len())?;
        Ok(self.score_pair(primary, secondary, pair))
    }

    fn check_inputs(&self, primary: usize, secondary: usize) -> Result<(), EvalError> {
        if self.params.bins == 0 {
            return Err(EvalError::InvalidBins);
        }
        if primary != secondary {
            return Err(EvalError::VolumeLengthMismatch { primary, secondary });
        }
        Ok(())
    }

    /// Row evaluation proper; callers have already run `check_inputs`.
    fn score_pair(
        &self,
        primary: &[u8],
        secondary: &[u8],
        pair: &PersistencePair,
    ) -> MetricsRecord {
        let (birth, death) = pair.truncated();
        let bins = self.params.bins;
        let interval = normalize(birth, death, bins);
        let outcome = build_masks(
            primary,
            secondary,
            interval,
            bins,
            self.params.secondary_axis,
        );
        MetricsRecord {
            birth,
            death,
            metrics: score_outcome(&outcome, self.params.recall_mode),
        }
    }

    /// Score every pair, preserving input order.
    pub fn evaluate_batch<P, S>(
        &self,
        primary: &P,
        secondary: &S,
        pairs: &[PersistencePair],
    ) -> Result<Vec<MetricsRecord>, EvalError>
    where
        P: VolumeView<Sample = u8>,
        S: VolumeView<Sample = u8>,
    {
        self.check_inputs(primary.len(), secondary.len())?;
        if !primary.is_coregistered_with(secondary) {
            warn!(
                "volume resolutions differ ({:?} vs {:?}); evaluating by flat index",
                primary.resolution(),
                secondary.resolution()
            );
        }

        let records = self.run_rows(primary.as_slice(), secondary.as_slice(), pairs);
        debug!(
            "evaluated {} pairs over {} voxels ({} degenerate)",
            records.len(),
            primary.len(),
            records.iter().filter(|r| r.metrics.is_zero()).count()
        );
        Ok(records)
    }

    /// Parse a delimited pair table and score it.
    pub fn evaluate_table<P, S>(
        &self,
        primary: &P,
        secondary: &S,
        table_text: &str,
    ) -> Result<Vec<MetricsRecord>, EvalError>
    where
        P: VolumeView<Sample = u8>,
        S: VolumeView<Sample = u8>,
    {
        let table = PairTable::parse(table_text)?;
        self.evaluate_batch(primary, secondary, &table.pairs)
    }

    #[cfg(feature = "parallel")]
    fn run_rows(
        &self,
        primary: &[u8],
        secondary: &[u8],
        pairs: &[PersistencePair],
    ) -> Vec<MetricsRecord> {
        use rayon::prelude::*;

        if !self.params.parallel {
            return self.run_rows_sequential(primary, secondary, pairs);
        }
        pairs
            .par_iter()
            .map(|pair| self.score_pair(primary, secondary, pair))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_rows(
        &self,
        primary: &[u8],
        secondary: &[u8],
        pairs: &[PersistencePair],
    ) -> Vec<MetricsRecord> {
        self.run_rows_sequential(primary, secondary, pairs)
    }

    fn run_rows_sequential(
        &self,
        primary: &[u8],
        secondary: &[u8],
        pairs: &[PersistencePair],
    ) -> Vec<MetricsRecord> {
        pairs
            .iter()
            .map(|pair| self.score_pair(primary, secondary, pair))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::VolumeU8;

    const PRIMARY: [u8; 6] = [0, 0, 1, 1, 2, 2];
    const SECONDARY: [u8; 6] = [5, 4, 5, 4, 5, 4];

    fn small_bins() -> Evaluator {
        Evaluator::new(EvalParams {
            bins: 8,
            ..Default::default()
        })
    }

    #[test]
    fn coarse_bins_example_scores_one() {
        let rec = small_bins()
            .evaluate_pair(&PRIMARY, &SECONDARY, &PersistencePair::new(1.0, 1.0))
            .expect("equal lengths");
        assert_eq!((rec.birth, rec.death), (1, 1));
        assert_eq!(rec.metrics.j_arc, 1.0);
        assert_eq!(rec.metrics.j_box, 1.0);
        assert_eq!(rec.metrics.precision, 1.0);
        assert_eq!(rec.metrics.recall, 1.0);
    }

    #[test]
    fn batch_preserves_row_order() {
        let pairs = [PersistencePair::new(5.0, 5.0), PersistencePair::new(1.0, 1.0)];
        let out = small_bins()
            .evaluate_batch(&VolumeU8::flat(&PRIMARY), &VolumeU8::flat(&SECONDARY), &pairs)
            .expect("batch");
        assert_eq!(out.len(), 2);
        assert_eq!((out[0].birth, out[0].death), (5, 5));
        assert_eq!((out[1].birth, out[1].death), (1, 1));
        // interval [4, 6] selects nothing
        assert!(out[0].metrics.is_zero());
        assert_eq!(out[1].metrics.j_arc, 1.0);
    }

    #[test]
    fn length_mismatch_aborts() {
        let err = small_bins()
            .evaluate_batch(
                &VolumeU8::flat(&PRIMARY),
                &VolumeU8::flat(&SECONDARY[..5]),
                &[PersistencePair::new(1.0, 1.0)],
            )
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::VolumeLengthMismatch {
                primary: 6,
                secondary: 5
            }
        );
    }

    #[test]
    fn single_pair_checks_lengths() {
        let err = small_bins()
            .evaluate_pair(&PRIMARY, &SECONDARY[..4], &PersistencePair::new(1.0, 1.0))
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::VolumeLengthMismatch {
                primary: 6,
                secondary: 4
            }
        );
    }

    #[test]
    fn zero_bins_is_rejected() {
        let evaluator = Evaluator::new(EvalParams {
            bins: 0,
            ..Default::default()
        });
        let err = evaluator
            .evaluate_batch(&VolumeU8::flat(&PRIMARY), &VolumeU8::flat(&SECONDARY), &[])
            .unwrap_err();
        assert_eq!(err, EvalError::InvalidBins);
    }

    #[test]
    fn missing_column_aborts_table() {
        let err = small_bins()
            .evaluate_table(
                &VolumeU8::flat(&PRIMARY),
                &VolumeU8::flat(&SECONDARY),
                "birth,lifetime\n1,1\n",
            )
            .unwrap_err();
        assert_eq!(err, EvalError::PairTable(PairTableError::MissingColumn("death")));
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let primary: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 256) as u8).collect();
        let secondary: Vec<u8> = (0..4096u32).map(|i| (i * 13 % 256) as u8).collect();
        let pairs: Vec<PersistencePair> = (0..40)
            .map(|i| PersistencePair::new((i * 6) as f64, (i * 6 + i % 5) as f64))
            .collect();
        let run = |parallel| {
            Evaluator::new(EvalParams {
                parallel,
                ..Default::default()
            })
            .evaluate_batch(&VolumeU8::flat(&primary), &VolumeU8::flat(&secondary), &pairs)
            .expect("batch")
        };
        assert_eq!(run(true), run(false));
    }
}
