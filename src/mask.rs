//! Voxel masks for a persistent feature and its bounding-box approximation.
//!
//! The feature mask selects voxels whose primary value lies in the bin
//! interval. Its reprojection onto the secondary axis gives a tight range
//! `[min, max]`; the box mask selects voxels inside both the interval and
//! that range, i.e. the axis-aligned rectangle in the (primary, secondary)
//! plane. Because the range is taken over the feature's own voxels, the
//! feature mask is always contained in the box mask.
use crate::interval::BinInterval;
use serde::{Deserialize, Serialize};

/// Orientation of the secondary (gradient) axis in the TF plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryAxis {
    /// `bins - 1 - v`: high gradient magnitudes plotted near the origin.
    #[default]
    Flipped,
    /// Secondary values used as stored.
    Identity,
}

impl SecondaryAxis {
    /// Map a stored secondary sample to its TF-plane coordinate.
    ///
    /// Computed in signed arithmetic, so samples above `bins - 1` project to
    /// negative coordinates instead of wrapping.
    #[inline]
    pub fn project(self, v: u8, bins: u32) -> i64 {
        match self {
            SecondaryAxis::Flipped => bins as i64 - 1 - v as i64,
            SecondaryAxis::Identity => v as i64,
        }
    }
}

/// Inclusive secondary-axis extent of a feature's reprojection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SecondaryRange {
    pub min: i64,
    pub max: i64,
}

impl SecondaryRange {
    #[inline]
    pub fn contains(&self, v: i64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Boolean selection over the flat voxel index space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelMask {
    bits: Vec<bool>,
    count: usize,
}

impl VoxelMask {
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> bool) -> Self {
        let bits: Vec<bool> = (0..len).map(f).collect();
        let count = bits.iter().filter(|&&b| b).count();
        Self { bits, count }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of selected voxels.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// `|self ∧ other|`
    pub fn and_count(&self, other: &VoxelMask) -> usize {
        debug_assert_eq!(self.len(), other.len());
        self.bits
            .iter()
            .zip(&other.bits)
            .filter(|&(&a, &b)| a && b)
            .count()
    }

    /// `|self ∨ other|`
    pub fn or_count(&self, other: &VoxelMask) -> usize {
        debug_assert_eq!(self.len(), other.len());
        self.bits
            .iter()
            .zip(&other.bits)
            .filter(|&(&a, &b)| a || b)
            .count()
    }

    pub fn is_subset_of(&self, other: &VoxelMask) -> bool {
        self.len() == other.len() && self.bits.iter().zip(&other.bits).all(|(&a, &b)| !a || b)
    }
}

/// Result of building the masks for one interval.
#[derive(Clone, Debug)]
pub enum MaskOutcome {
    /// No primary voxel falls in the interval; the box is undefined.
    Empty,
    Built {
        feature: VoxelMask,
        boxed: VoxelMask,
        range: SecondaryRange,
    },
}

impl MaskOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, MaskOutcome::Empty)
    }
}

/// Build the feature mask and its bounding-box mask.
///
/// `primary` and `secondary` must be co-registered (equal length).
pub fn build_masks(
    primary: &[u8],
    secondary: &[u8],
    interval: BinInterval,
    bins: u32,
    axis: SecondaryAxis,
) -> MaskOutcome {
    debug_assert_eq!(primary.len(), secondary.len());
    let n = primary.len().min(secondary.len());
    let in_interval = |i: usize| interval.contains(primary[i] as u32);

    let feature = VoxelMask::from_fn(n, in_interval);
    let Some(range) = reprojected_range(&feature, secondary, bins, axis) else {
        return MaskOutcome::Empty;
    };

    let boxed = VoxelMask::from_fn(n, |i| {
        in_interval(i) && range.contains(axis.project(secondary[i], bins))
    });
    MaskOutcome::Built {
        feature,
        boxed,
        range,
    }
}

/// Tight secondary-axis range over the voxels selected by `feature`.
pub fn reprojected_range(
    feature: &VoxelMask,
    secondary: &[u8],
    bins: u32,
    axis: SecondaryAxis,
) -> Option<SecondaryRange> {
    feature
        .as_slice()
        .iter()
        .zip(secondary)
        .filter(|&(&selected, _)| selected)
        .map(|(_, &g)| axis.project(g, bins))
        .fold(None, |acc, g| match acc {
            None => Some(SecondaryRange { min: g, max: g }),
            Some(r) => Some(SecondaryRange {
                min: r.min.min(g),
                max: r.max.max(g),
            }),
        })
}
