use crate::{rng, AgentId, SplitMix64};

/// Simulation ticks per in-game minute.
pub const TICKS_PER_MINUTE: u64 = 60;
pub const TICKS_PER_HOUR: u64 = TICKS_PER_MINUTE * 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds: 1.0 / TICKS_PER_MINUTE as f32,
            seed,
        }
    }

    pub fn rng_for_agent(&self, agent: AgentId, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}

pub const fn minutes(minutes: u64) -> u64 {
    minutes * TICKS_PER_MINUTE
}
