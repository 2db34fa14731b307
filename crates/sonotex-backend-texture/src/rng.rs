//! Deterministic RNG wrapper using PCG32.
//!
//! All jitter in line patterns MUST be drawn from this type so a render is
//! reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating the bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Derive the seed for one grid cell using BLAKE3.
    ///
    /// Each cell gets an independent stream, so changing one cell's
    /// descriptor never perturbs the jitter of its neighbours.
    pub fn derive_cell_seed(base_seed: u32, cell_index: u32) -> u32 {
        let mut input = Vec::with_capacity(8);
        input.extend_from_slice(&base_seed.to_le_bytes());
        input.extend_from_slice(&cell_index.to_le_bytes());
        let hash = blake3::hash(&input);
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&hash.as_bytes()[0..4]);
        u32::from_le_bytes(bytes)
    }

    /// Create the RNG for one grid cell.
    pub fn for_cell(base_seed: u32, cell_index: u32) -> Self {
        Self::new(Self::derive_cell_seed(base_seed, cell_index))
    }

    /// Generate a random f64 in the range [0.0, 1.0).
    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random value in the given range.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }
}
