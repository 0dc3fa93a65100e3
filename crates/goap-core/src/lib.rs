//! World-state algebra and deterministic kernel primitives for goal-directed action planning.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod grid;
pub mod hash;
pub mod plan;
pub mod rng;
pub mod state;
pub mod tick;

pub use agent::AgentId;
pub use blackboard::{BbKey, Blackboard};
pub use grid::{Footprint, Pos};
pub use hash::stable_hash;
pub use plan::PlanSpec;
pub use rng::{DeterministicRng, SplitMix64};
pub use state::{AiVar, FactValue, WorldState};
pub use tick::{minutes, TickContext, TICKS_PER_HOUR, TICKS_PER_MINUTE};
