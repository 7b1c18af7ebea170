//! Persistence pair → discrete bin interval.
//!
//! The pair is sorted, each endpoint is clamped into `[0, bins-1]`, and a
//! zero-width result is widened by one bin on each side (re-clamped), so a
//! feature covers at least two bins whenever there is room to grow.
use serde::Serialize;

/// Inclusive bin range `[low, high]` on the primary (scalar) axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BinInterval {
    pub low: u32,
    pub high: u32,
}

impl BinInterval {
    /// Number of bins covered, endpoints included.
    #[inline]
    pub fn width(&self) -> u32 {
        self.high - self.low + 1
    }

    #[inline]
    pub fn contains(&self, v: u32) -> bool {
        v >= self.low && v <= self.high
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }
}

/// Clamp and pad an integer `(birth, death)` pair into a bin interval.
///
/// `bins == 0` is treated as a single bin.
pub fn normalize(birth: i64, death: i64, bins: u32) -> BinInterval {
    let top = bins.max(1) as i64 - 1;
    let (lo, hi) = if birth <= death {
        (birth, death)
    } else {
        (death, birth)
    };
    let mut low = lo.clamp(0, top);
    let mut high = hi.clamp(0, top);
    if low == high {
        low = (low - 1).max(0);
        high = (high + 1).min(top);
    }
    BinInterval {
        low: low as u32,
        high: high as u32,
    }
}
