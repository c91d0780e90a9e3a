//! Seeded 2D value noise with smooth interpolation between lattice points.

use crate::rng::Rng;

const TABLE_SIZE: usize = 256;

/// Coherent noise field sampled in lattice units; values lie in `[0, 1]`.
pub(super) struct ValueNoise {
    perm: [u8; TABLE_SIZE * 2],
    values: [f64; TABLE_SIZE],
}

impl ValueNoise {
    pub(super) fn new(seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let mut perm = [0_u8; TABLE_SIZE * 2];
        for (index, slot) in perm.iter_mut().take(TABLE_SIZE).enumerate() {
            *slot = index as u8;
        }
        // Fisher-Yates over the first half, then mirror so lookups never wrap.
        for index in (1..TABLE_SIZE).rev() {
            let swap = rng.index(index + 1);
            perm.swap(index, swap);
        }
        perm.copy_within(0..TABLE_SIZE, TABLE_SIZE);

        let mut values = [0.0; TABLE_SIZE];
        for value in &mut values {
            *value = rng.next_f64();
        }
        Self { perm, values }
    }

    pub(super) fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = smoothstep(x - x0);
        let fy = smoothstep(y - y0);
        let ix = lattice(x0);
        let iy = lattice(y0);

        let top = lerp(self.corner(ix, iy), self.corner(ix + 1, iy), fx);
        let bottom = lerp(self.corner(ix, iy + 1), self.corner(ix + 1, iy + 1), fx);
        lerp(top, bottom, fy)
    }

    fn corner(&self, ix: usize, iy: usize) -> f64 {
        let hash = self.perm[self.perm[ix & (TABLE_SIZE - 1)] as usize + (iy & (TABLE_SIZE - 1))];
        self.values[hash as usize]
    }
}

fn lattice(coordinate: f64) -> usize {
    (coordinate as i64).rem_euclid(TABLE_SIZE as i64) as usize
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
