/// Read-only access to a flattened scalar volume.
///
/// Voxels are addressed by a single flat index shared by every volume taking
/// part in an evaluation; the optional resolution is informational only.
pub trait VolumeView {
    type Sample: Copy;

    fn as_slice(&self) -> &[Self::Sample];

    fn resolution(&self) -> Option<[usize; 3]> {
        None
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when both volumes hold one sample per voxel of the same grid.
    fn is_coregistered_with<V: VolumeView>(&self, other: &V) -> bool
    where
        Self: Sized,
    {
        if self.len() != other.len() {
            return false;
        }
        match (self.resolution(), other.resolution()) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}
