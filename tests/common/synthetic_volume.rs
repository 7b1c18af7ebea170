#![allow(dead_code)]

/// Flat index of `(x, y, z)` on a cubic grid of side `dim`, x fastest.
pub fn idx(dim: usize, x: usize, y: usize, z: usize) -> usize {
    (z * dim + y) * dim + x
}

/// 16³ volume of three nested cubes: background 128, middle 230, core 255.
pub fn nested_cubes_u8() -> Vec<u8> {
    let dim = 16usize;
    let mut vol = vec![128u8; dim * dim * dim];
    for z in 4..12 {
        for y in 4..12 {
            for x in 4..12 {
                vol[idx(dim, x, y, z)] = 230;
            }
        }
    }
    for z in 6..10 {
        for y in 6..10 {
            for x in 6..10 {
                vol[idx(dim, x, y, z)] = 255;
            }
        }
    }
    vol
}

/// 16³ volume ramping from 0 at x=0 to 255 at x=15.
pub fn x_ramp_u8() -> Vec<u8> {
    let dim = 16usize;
    let mut vol = vec![0u8; dim * dim * dim];
    for z in 0..dim {
        for y in 0..dim {
            for x in 0..dim {
                vol[idx(dim, x, y, z)] = ((x as f32 / 15.0) * 255.0) as u8;
            }
        }
    }
    vol
}

/// Binary torus: 255 inside the tube, 0 outside, on a `[-1, 1]³` grid.
pub fn donut_u8(dim: usize, tube_radius: f32, ring_radius: f32) -> Vec<u8> {
    assert!(dim > 1, "donut grid needs at least two samples per axis");
    let coord = |i: usize| -1.0 + 2.0 * i as f32 / (dim - 1) as f32;
    let mut vol = vec![0u8; dim * dim * dim];
    for z in 0..dim {
        for y in 0..dim {
            for x in 0..dim {
                let (fx, fy, fz) = (coord(x), coord(y), coord(z));
                let ring = (fx * fx + fy * fy).sqrt() - ring_radius;
                if (ring * ring + fz * fz).sqrt() < tube_radius {
                    vol[idx(dim, x, y, z)] = 255;
                }
            }
        }
    }
    vol
}

/// Central-difference gradient magnitude, scaled to u8 and clamped.
pub fn gradient_magnitude_u8(vol: &[u8], dim: usize) -> Vec<u8> {
    let at = |x: usize, y: usize, z: usize| vol[idx(dim, x, y, z)] as f32;
    let mut out = vec![0u8; vol.len()];
    for z in 0..dim {
        for y in 0..dim {
            for x in 0..dim {
                let gx = at((x + 1).min(dim - 1), y, z) - at(x.saturating_sub(1), y, z);
                let gy = at(x, (y + 1).min(dim - 1), z) - at(x, y.saturating_sub(1), z);
                let gz = at(x, y, (z + 1).min(dim - 1)) - at(x, y, z.saturating_sub(1));
                let mag = 0.5 * (gx * gx + gy * gy + gz * gz).sqrt();
                out[idx(dim, x, y, z)] = mag.clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}
