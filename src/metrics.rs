//! Set-overlap scores between a feature mask and its box approximation.
use crate::mask::{MaskOutcome, VoxelMask};
use serde::{Deserialize, Serialize};

/// Denominator used for the recall score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecallMode {
    /// `TP / |box|`, identical to `J_box`. Matches the published metric tables.
    #[default]
    BoxDenominator,
    /// `TP / |feature|`, treating the feature mask as ground truth.
    FeatureDenominator,
}

/// Raw population counts behind the four scores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapCounts {
    pub true_positive: usize,
    pub feature: usize,
    pub boxed: usize,
    pub union: usize,
}

impl OverlapCounts {
    pub fn from_masks(feature: &VoxelMask, boxed: &VoxelMask) -> Self {
        Self {
            true_positive: feature.and_count(boxed),
            feature: feature.count(),
            boxed: boxed.count(),
            union: feature.or_count(boxed),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct OverlapMetrics {
    #[serde(rename = "J_arc")]
    pub j_arc: f64,
    #[serde(rename = "J_box")]
    pub j_box: f64,
    pub precision: f64,
    pub recall: f64,
}

impl OverlapMetrics {
    pub const fn zero() -> Self {
        Self {
            j_arc: 0.0,
            j_box: 0.0,
            precision: 0.0,
            recall: 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

#[inline]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Score a set of overlap counts; any zero denominator yields `0.0`.
pub fn score(counts: &OverlapCounts, recall_mode: RecallMode) -> OverlapMetrics {
    let tp = counts.true_positive;
    let recall = match recall_mode {
        RecallMode::BoxDenominator => ratio(tp, counts.boxed),
        RecallMode::FeatureDenominator => ratio(tp, counts.feature),
    };
    OverlapMetrics {
        j_arc: ratio(tp, counts.union),
        j_box: ratio(tp, counts.boxed),
        precision: ratio(tp, counts.feature),
        recall,
    }
}

/// Score a mask outcome; an empty feature scores zero on every metric.
pub fn score_outcome(outcome: &MaskOutcome, recall_mode: RecallMode) -> OverlapMetrics {
    match outcome {
        MaskOutcome::Empty => OverlapMetrics::zero(),
        MaskOutcome::Built { feature, boxed, .. } => {
            score(&OverlapCounts::from_masks(feature, boxed), recall_mode)
        }
    }
}
