use super::traits::VolumeView;

#[derive(Clone, Copy, Debug)]
pub struct VolumeU8<'a> {
    pub resolution: Option<[usize; 3]>, // x, y, z when known
    pub data: &'a [u8],
}

impl<'a> VolumeU8<'a> {
    /// View over a flat buffer with no known grid shape.
    pub fn flat(data: &'a [u8]) -> Self {
        Self {
            resolution: None,
            data,
        }
    }

    /// Flat index of voxel `(x, y, z)` in x-fastest order.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let [rx, ry, rz] = self.resolution?;
        (x < rx && y < ry && z < rz).then(|| (z * ry + y) * rx + x)
    }
}

impl<'a> VolumeView for VolumeU8<'a> {
    type Sample = u8;

    #[inline]
    fn as_slice(&self) -> &[u8] {
        self.data
    }

    #[inline]
    fn resolution(&self) -> Option<[usize; 3]> {
        self.resolution
    }
}
