//! Seeded randomness for cost jitter.
//!
//! Every draw is a pure function of (global seed, agent, stream, draw index),
//! so replays reproduce the same plans. Not cryptographic.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform in `[0, 1)` from the top 24 bits of a draw.
    fn unit_f32(&mut self) -> f32 {
        let bits = (self.next_u64() >> 40) as u32;
        bits as f32 / (1u32 << 24) as f32
    }

    /// Uniform in `[from, to)`. A reversed range is swapped rather than rejected.
    fn range_f32(&mut self, from: f32, to: f32) -> f32 {
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        lo + (hi - lo) * self.unit_f32()
    }
}

/// SplitMix64 generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        finalize(self.state)
    }
}

fn finalize(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed for one agent's stream. Distinct agents and streams never share a sequence
/// for the same global seed in practice.
pub fn derive_seed(global_seed: u64, agent_id: u64, stream: u64) -> u64 {
    finalize(global_seed ^ finalize(agent_id.wrapping_add(GOLDEN_GAMMA)) ^ finalize(stream))
}
