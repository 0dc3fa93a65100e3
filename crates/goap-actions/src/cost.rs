//! Planner cost of an action for a given agent and goal.

use goap_core::DeterministicRng;
use goap_goals::{Goal, GoalCategory};

use crate::config::CostConfig;
use crate::{ActionDescriptor, ActionId, AgentBlackboard, CapabilitySnapshot};

/// Cost reported when a colony goal's job is missing from the agent's slots.
pub const MISSING_SKILL_COST: f32 = 1000.0;
pub const PERSONAL_COST: f32 = 0.5;
pub const FALLBACK_COST: f32 = 1.0;

/// Cost by goal category.
///
/// Colony work is priced by the agent's skill in the goal's job as of `tick`;
/// personal and combat goals are flat. Any other category should be priced by
/// the action itself.
pub fn default_cost_for(
    descriptor: &ActionDescriptor,
    capabilities: &CapabilitySnapshot,
    goal: &Goal,
    tick: u64,
) -> f32 {
    match goal.category() {
        GoalCategory::Colony => match capabilities.job(goal.job()) {
            Some(slot) => slot.action_cost(tick),
            None => {
                tracing::error!(
                    action = %descriptor.id(),
                    goal = goal.id().0,
                    job = goal.job().0,
                    "skill not found for agent"
                );
                MISSING_SKILL_COST
            }
        },
        GoalCategory::Personal | GoalCategory::Combat => PERSONAL_COST,
        GoalCategory::Idle => {
            tracing::error!(
                action = %descriptor.id(),
                category = ?goal.category(),
                "override cost_for for this goal category"
            );
            FALLBACK_COST
        }
    }
}

/// A random weight in `[random_min, random_max)`, stable for one cache window.
pub fn cached_random_cost(
    blackboard: &mut AgentBlackboard,
    action: ActionId,
    tick: u64,
    config: &CostConfig,
) -> f32 {
    if let Some(weight) = blackboard.try_get_cached_cost(action, tick) {
        return weight;
    }
    let weight = blackboard
        .rng
        .range_f32(config.random_min, config.random_max);
    blackboard.set_cached_cost(action, weight, tick, config.random_window_ticks);
    weight
}

/// Like [`cached_random_cost`], but free while the action is cooling down.
/// The cache is left untouched during the cooldown.
pub fn cached_random_cost_with_cooldown(
    blackboard: &mut AgentBlackboard,
    action: ActionId,
    tick: u64,
    config: &CostConfig,
) -> f32 {
    if blackboard.is_cooling_down(action, tick) {
        return 0.0;
    }
    cached_random_cost(blackboard, action, tick, config)
}
