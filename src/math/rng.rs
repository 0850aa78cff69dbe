//! Seeded random source
//!
//! A small 32-bit generator (mulberry32) that produces the same sequence on
//! every platform for a given seed. All state is a single `u32` advanced with
//! wrapping arithmetic, so placements recorded once can be reproduced exactly.

use rand::RngCore;

/// Integer seed that fully determines a [`RandomStream`]
pub type Seed = u32;

const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Deterministic pseudo-random stream derived from a [`Seed`]
///
/// Each draw advances the internal state. A stream is owned by exactly one
/// planning run or one animated component; create a fresh one per run to get
/// reproducible output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomStream {
    state: u32,
}

impl RandomStream {
    /// Create a stream positioned at the start of the sequence for `seed`
    pub fn new(seed: Seed) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(t | 1);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        r ^ (r >> 14)
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    /// Uniform value in `[min, max)`
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Pick one entry of a non-empty slice, consuming exactly one draw
    ///
    /// # Panics
    /// Panics if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = (self.next_f64() * items.len() as f64).floor() as usize;
        &items[index.min(items.len() - 1)]
    }

    /// Whole degrees in `[0, span)`, the way yaw jitter is drawn for props
    pub fn whole_degrees(&mut self, span: f64) -> f64 {
        (self.next_f64() * span).floor()
    }
}

impl RngCore for RandomStream {
    fn next_u32(&mut self) -> u32 {
        RandomStream::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let low = RandomStream::next_u32(self) as u64;
        let high = RandomStream::next_u32(self) as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = RandomStream::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
