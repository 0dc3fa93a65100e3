use std::collections::BTreeMap;
use std::sync::Arc;

use goap_core::rng::derive_seed;
use goap_core::{AgentId, Blackboard, Pos, SplitMix64};
use goap_goals::Goal;

use crate::{ActionId, CapabilitySnapshot, Presentation};

/// Handle to a transient visual effect owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FxHandle(pub u64);

const COST_RNG_STREAM: u64 = 0x636f_7374;

#[derive(Debug, Clone, Copy, PartialEq)]
struct CachedCost {
    weight: f32,
    expires_at: u64,
}

/// Per-agent scratch record carried across ticks.
///
/// Actions are shared between agents, so this is the only place an action may
/// keep state between two `execute` calls.
#[derive(Debug)]
pub struct AgentBlackboard {
    /// Accumulated work on the current action.
    pub progress: f32,
    /// One-shot check latch, reset on activation.
    pub checked: bool,
    pub move_target: Option<Pos>,
    pub move_in_flight: bool,
    pub fx: Option<FxHandle>,
    pub next_sound_tick: u64,
    /// Goal claimed by streamlining, picked up by the coordinator after success.
    pub streamlined_next: Option<Arc<Goal>>,
    pub rng: SplitMix64,
    pub extra: Blackboard,
    cost_cache: BTreeMap<ActionId, CachedCost>,
    cooldowns: BTreeMap<ActionId, u64>,
}

impl AgentBlackboard {
    pub fn new(seed: u64) -> Self {
        Self {
            progress: 0.0,
            checked: false,
            move_target: None,
            move_in_flight: false,
            fx: None,
            next_sound_tick: 0,
            streamlined_next: None,
            rng: SplitMix64::new(seed),
            extra: Blackboard::new(),
            cost_cache: BTreeMap::new(),
            cooldowns: BTreeMap::new(),
        }
    }

    pub fn try_get_cached_cost(&self, action: ActionId, tick: u64) -> Option<f32> {
        self.cost_cache
            .get(&action)
            .filter(|c| tick < c.expires_at)
            .map(|c| c.weight)
    }

    pub fn set_cached_cost(&mut self, action: ActionId, weight: f32, tick: u64, window: u64) {
        self.cost_cache.insert(
            action,
            CachedCost {
                weight,
                expires_at: tick.saturating_add(window),
            },
        );
    }

    pub fn is_cooling_down(&self, action: ActionId, tick: u64) -> bool {
        self.cooldowns.get(&action).is_some_and(|until| tick < *until)
    }

    pub fn set_cooldown(&mut self, action: ActionId, until_tick: u64) {
        self.cooldowns.insert(action, until_tick);
    }

    pub fn clear_cooldown(&mut self, action: ActionId) {
        self.cooldowns.remove(&action);
    }

    /// Release the transient effect, if any.
    pub fn clear_fx<P: Presentation + ?Sized>(&mut self, world: &mut P) {
        if let Some(fx) = self.fx.take() {
            world.release_fx(fx);
        }
    }

    pub fn reset_scratch(&mut self) {
        self.progress = 0.0;
        self.checked = false;
    }

    /// Called by the host when the pending path request resolves.
    pub fn finish_move(&mut self) {
        self.move_in_flight = false;
    }
}

/// An executing agent: identity, capabilities and its scratch blackboard.
#[derive(Debug)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub capabilities: CapabilitySnapshot,
    pub blackboard: AgentBlackboard,
    action_started_at: Option<u64>,
}

impl Agent {
    pub fn new(
        id: AgentId,
        name: impl Into<String>,
        capabilities: CapabilitySnapshot,
        seed: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            capabilities,
            blackboard: AgentBlackboard::new(derive_seed(seed, id.stable_id(), COST_RNG_STREAM)),
            action_started_at: None,
        }
    }

    pub fn mark_action_started(&mut self, tick: u64) {
        self.action_started_at = Some(tick);
    }

    pub fn clear_action_started(&mut self) {
        self.action_started_at = None;
    }

    pub fn ticks_in_current_action(&self, tick: u64) -> u64 {
        self.action_started_at
            .map_or(0, |start| tick.saturating_sub(start))
    }
}
