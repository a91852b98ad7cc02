/// Seeded 2D coherent noise for the noise field effect.
///
/// Four octaves of smoothed value noise over a hashed integer lattice,
/// normalized to [0, 1]. Deterministic for a given seed, so a frame is a
/// pure function of (scene, cursor, time).
#[derive(Clone, Copy, Debug)]
pub struct Noise2 {
    seed: u64,
}

const OCTAVES: u32 = 4;

impl Default for Noise2 {
    fn default() -> Self {
        Self::new(0x6779_7068_6472_6966)
    }
}

impl Noise2 {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Sample the fractal noise field at (x, y). Result is in [0, 1].
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut sum = 0.0;
        let mut amp = 0.5;
        let mut freq = 1.0;
        let mut norm = 0.0;
        for octave in 0..OCTAVES {
            sum += amp * self.smooth(x * freq, y * freq, octave);
            norm += amp;
            amp *= 0.5;
            freq *= 2.0;
        }
        (sum / norm).clamp(0.0, 1.0)
    }

    /// Bilinear lattice interpolation with smoothstep weights.
    fn smooth(&self, x: f64, y: f64, octave: u32) -> f64 {
        let ix = x.floor();
        let iy = y.floor();
        let fx = x - ix;
        let fy = y - iy;
        let sx = fx * fx * (3.0 - 2.0 * fx);
        let sy = fy * fy * (3.0 - 2.0 * fy);

        let ix = ix as i64;
        let iy = iy as i64;
        let n00 = self.lattice(ix, iy, octave);
        let n10 = self.lattice(ix + 1, iy, octave);
        let n01 = self.lattice(ix, iy + 1, octave);
        let n11 = self.lattice(ix + 1, iy + 1, octave);

        let nx0 = n00 + sx * (n10 - n00);
        let nx1 = n01 + sx * (n11 - n01);
        nx0 + sy * (nx1 - nx0)
    }

    /// FNV-1a over (seed, octave, lattice coords), folded down to [0, 1).
    fn lattice(&self, ix: i64, iy: i64, octave: u32) -> f64 {
        const PRIME: u64 = 0x0000_0100_0000_01B3;
        let mut h = 0xcbf2_9ce4_8422_2325u64 ^ self.seed;
        for byte in u64::from(octave)
            .to_le_bytes()
            .into_iter()
            .chain((ix as u64).to_le_bytes())
            .chain((iy as u64).to_le_bytes())
        {
            h ^= u64::from(byte);
            h = h.wrapping_mul(PRIME);
        }
        (h >> 11) as f64 / (1u64 << 53) as f64
    }
}
