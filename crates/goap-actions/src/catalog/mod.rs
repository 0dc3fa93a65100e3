//! Bundled actions.

pub mod deconstruct;
pub mod harvest;

pub use deconstruct::Deconstruct;
pub use harvest::Harvest;

use goap_core::{minutes, Pos};

use crate::{AbilityRegistry, ActionRegistry, ActionWorld, Agent, RegistryError};

const SOUND_INTERVAL_TICKS: u64 = minutes(5);

/// Register every bundled action. Which ability groups each one declares
/// depends on the abilities `abilities` knows about.
pub fn register_all(
    registry: &mut ActionRegistry,
    abilities: &AbilityRegistry,
) -> Result<(), RegistryError> {
    registry.register(Deconstruct::new(abilities))?;
    registry.register(Harvest::new(abilities))?;
    Ok(())
}

/// Work effect and a rate-limited work sound.
fn show_work_fx(
    world: &mut dyn ActionWorld,
    agent: &mut Agent,
    at: Pos,
    fx: &'static str,
    sound: &'static str,
    now: u64,
) {
    if agent.blackboard.fx.is_none() {
        agent.blackboard.fx = world.spawn_fx(agent.id, at, fx);
    }
    if agent.blackboard.next_sound_tick <= now {
        agent.blackboard.next_sound_tick = now + SOUND_INTERVAL_TICKS;
        world.play_sound(agent.id, sound);
    }
}
