//! Permuted congruential generator (PCG32).
//!
//! Implements the XSH-RR variant from M. E. O'Neill's reference `pcg32`:
//! 64-bit LCG state, 32-bit output. Streams are fully determined by the
//! `(init_state, init_seq)` pair, so renders are reproducible bit-for-bit.
//!
//! A generator is mutable state; every parallel work unit owns its own
//! instance (see `bucket.rs`), never a shared one.

use rand::RngCore;

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// PCG32 random number generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg {
    state: u64,
    inc: u64,
}

impl Pcg {
    /// Seed a new stream. `init_seq` selects one of 2^63 independent sequences.
    pub fn new(init_state: u64, init_seq: u64) -> Self {
        let mut pcg = Self {
            state: 0,
            inc: (init_seq << 1) | 1,
        };

        pcg.random();
        pcg.state = pcg.state.wrapping_add(init_state);
        pcg.random();

        pcg
    }

    /// Advance the state and return a uniformly distributed 32-bit value.
    pub fn random(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(self.inc);

        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform float in [0, 1]: the 32-bit draw divided by `2^32 - 1`.
    pub fn random_float(&mut self) -> f32 {
        (self.random() as f64 / u32::MAX as f64) as f32
    }
}

impl Default for Pcg {
    fn default() -> Self {
        Self::new(42, 54)
    }
}

/// Lets a PCG stream drive `rand` helpers (`gen_range`, shuffles, ...).
impl RngCore for Pcg {
    fn next_u32(&mut self) -> u32 {
        self.random()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.random() as u64;
        let lo = self.random() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.random().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
