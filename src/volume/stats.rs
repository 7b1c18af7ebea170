use super::VolumeView;
use serde::Serialize;

/// Intensity summary of an 8-bit volume.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeStats {
    pub voxels: usize,
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    pub non_zero: usize,
    /// Per-bin voxel counts; samples past the last bin are folded into it.
    #[serde(skip_serializing)]
    pub histogram: Vec<usize>,
}

impl VolumeStats {
    pub fn compute<V: VolumeView<Sample = u8>>(volume: &V, bins: usize) -> Self {
        let data = volume.as_slice();
        let mut histogram = vec![0usize; bins.max(1)];
        let last = histogram.len() - 1;
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        let mut sum = 0u64;
        let mut non_zero = 0usize;
        for &v in data {
            min = min.min(v);
            max = max.max(v);
            sum += v as u64;
            if v != 0 {
                non_zero += 1;
            }
            histogram[(v as usize).min(last)] += 1;
        }
        if data.is_empty() {
            min = 0;
        }
        let mean = if data.is_empty() {
            0.0
        } else {
            sum as f64 / data.len() as f64
        };
        Self {
            voxels: data.len(),
            min,
            max,
            mean,
            non_zero,
            histogram,
        }
    }
}
