use goap_core::{Pos, WorldState};
use goap_goals::{try_streamline, Goal, Target};

use super::show_work_fx;
use crate::ids::{abilities, jobs, vars};
use crate::support::{face_target, is_near_target};
use crate::{
    AbilityRegistry, Action, ActionContext, ActionDescriptor, ActionId, ActionWorld, Agent,
    ExecutionResult, WorkTargetKind,
};

pub const DECONSTRUCT: ActionId = ActionId::new("Deconstruct");

/// Take apart a constructed tile.
///
/// Builders can always do it. When the host knows a "Destroy" ability, agents
/// with Destroy instead of Build qualify too.
pub struct Deconstruct {
    descriptor: ActionDescriptor,
}

impl Deconstruct {
    pub fn new(known: &AbilityRegistry) -> Self {
        let base = ActionDescriptor::new(DECONSTRUCT)
            .with_name(|| "Deconstruct".to_string())
            .with_preconditions(
                WorldState::with(vars::IS_NEAR, true).and(vars::IS_DECONSTRUCTED, false),
            )
            .with_outcomes(WorldState::with(vars::IS_DECONSTRUCTED, true))
            .with_required_job_type(jobs::DEMOLITION);
        let descriptor = match known.resolve("Destroy") {
            Some(destroy) => base
                .with_required_abilities([abilities::MOVE, abilities::WORK])
                .with_required_one_of([abilities::BUILD, destroy]),
            None => base.with_required_abilities([
                abilities::BUILD,
                abilities::MOVE,
                abilities::WORK,
            ]),
        };
        Self { descriptor }
    }

    fn perform_work(
        &self,
        cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
        goal: &Goal,
        pos: Pos,
        work: f32,
    ) -> ExecutionResult {
        face_target(world, agent, goal.target());
        if world.add_deconstruction(pos, work) {
            goal.merge_world(self.descriptor.outcomes());
            world.break_down(pos);
            if cx.config.streamlining.enabled {
                agent.blackboard.streamlined_next =
                    try_streamline(world.goal_board(), agent.id, goal, cx.now());
            }
            return ExecutionResult::Success;
        }
        show_work_fx(world, agent, pos, "DeconstructVFX", "construct", cx.now());
        ExecutionResult::InProgress
    }
}

/// Checked once per activation: a floor can't be removed from under an object or wall.
fn check_floor(world: &dyn ActionWorld, agent: &mut Agent, pos: Pos, floor: bool) -> bool {
    if agent.blackboard.checked {
        return true;
    }
    agent.blackboard.checked = true;
    !(floor && world.is_floor_occupied(pos))
}

/// Removing the floor at `target` must leave the agent at least two ways out.
fn is_safe_to_deconstruct(world: &dyn ActionWorld, target: Pos, at: Pos) -> bool {
    if at == target {
        return false;
    }
    at.neighbors4()
        .into_iter()
        .filter(|p| world.is_walkable(*p))
        .nth(1)
        .is_some()
}

impl Action for Deconstruct {
    fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }

    fn execute(
        &self,
        cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
        goal: &Goal,
    ) -> ExecutionResult {
        if world.is_busy(agent.id) {
            // stepping aside
            return ExecutionResult::InProgress;
        }
        let Target::Tile { pos, .. } = *goal.target() else {
            return ExecutionResult::error(format!("target is not constructable: {}", goal.target()));
        };
        let floor = match world.work_target(pos) {
            None => return ExecutionResult::Success,
            Some(WorkTargetKind::Constructable { floor }) => floor,
            Some(WorkTargetKind::Plant) => {
                return ExecutionResult::error(format!(
                    "target is not constructable: {}",
                    goal.target()
                ))
            }
        };
        if !check_floor(world, agent, pos, floor) {
            return ExecutionResult::failed("floor in use");
        }

        let nav = &cx.config.navigation;
        if floor && world.is_grounded(agent.id) {
            let at = world.position_of(agent.id);
            if !is_safe_to_deconstruct(world, pos, at) {
                if !world.try_step_aside(agent.id)
                    || agent.ticks_in_current_action(cx.now()) > nav.step_aside_limit_ticks
                {
                    world.store_nav_failure(agent.id, pos, Some(nav.unsafe_cooldown_ticks));
                    return ExecutionResult::failed_soft("would get stuck");
                }
                return ExecutionResult::InProgress;
            }
        }

        if world.is_immutable(pos) {
            return ExecutionResult::cancelled("cancelled");
        }

        if !is_near_target(world.position_of(agent.id), goal.target()) {
            if !world.is_grounded(agent.id) {
                tracing::error!(
                    agent = agent.id.0,
                    goal = goal.id().0,
                    view = %goal.world_state(),
                    "deconstructing while a flying worker is not near"
                );
            }
            goal.with_world(vars::IS_NEAR, false);
            return ExecutionResult::needs_replan("unreachable");
        }

        let Some(slot) = agent.capabilities.job(jobs::DEMOLITION).copied() else {
            return ExecutionResult::error(format!(
                "{} has no demolition job for {}",
                agent.id,
                goal.target()
            ));
        };
        self.perform_work(cx, world, agent, goal, pos, slot.use_skill())
    }
}
