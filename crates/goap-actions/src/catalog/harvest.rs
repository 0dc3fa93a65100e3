use goap_core::WorldState;
use goap_goals::{Goal, Target};

use super::show_work_fx;
use crate::ids::{abilities, jobs, vars};
use crate::support::{face_target, is_near_target};
use crate::{
    AbilityRegistry, Action, ActionContext, ActionDescriptor, ActionId, ActionWorld, Agent,
    ExecutionResult, WorkTargetKind,
};

pub const HARVEST: ActionId = ActionId::new("Harvest");

/// Work a plant until it yields, then drop the yield at the output tile.
pub struct Harvest {
    descriptor: ActionDescriptor,
}

impl Harvest {
    pub fn new(known: &AbilityRegistry) -> Self {
        let mut descriptor = ActionDescriptor::new(HARVEST)
            .with_name(|| "Harvest plant".to_string())
            .with_preconditions(WorldState::with(vars::IS_NEAR, true).and(vars::IS_HARVESTED, false))
            .with_outcomes(WorldState::with(vars::IS_HARVESTED, true))
            .with_required_abilities([abilities::MANIPULATE, abilities::WORK])
            .with_required_job_type(jobs::PLANTS)
            .quiet();
        if let Some(harvest) = known.resolve("Harvest") {
            descriptor = descriptor.with_alternative_abilities([harvest, abilities::WORK]);
        }
        Self { descriptor }
    }
}

impl Action for Harvest {
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
        let pos = match *goal.target() {
            Target::Tile { pos, .. } | Target::Entity { pos, .. } => pos,
            Target::Position(_) => {
                return ExecutionResult::error(format!("wrong target in harvest goal: {}", goal.target()))
            }
        };
        match world.work_target(pos) {
            Some(WorkTargetKind::Plant) => {}
            None => return ExecutionResult::failed("target unavailable"),
            Some(WorkTargetKind::Constructable { .. }) => {
                return ExecutionResult::error(format!("wrong target in harvest goal: {}", goal.target()))
            }
        }
        if !is_near_target(world.position_of(agent.id), goal.target()) {
            tracing::error!(
                agent = agent.id.0,
                goal = goal.id().0,
                view = %goal.world_state(),
                "harvesting while the worker is not near"
            );
            goal.with_world(vars::IS_NEAR, false);
            return ExecutionResult::needs_replan("unreachable");
        }
        let Some(slot) = agent.capabilities.job(jobs::PLANTS).copied() else {
            return ExecutionResult::error(format!("{} has no plants job", agent.id));
        };

        face_target(world, agent, goal.target());
        agent.blackboard.progress += slot.use_skill();
        if agent.blackboard.progress <= 1.0 {
            show_work_fx(world, agent, pos, "RepairFX", "repairs", cx.now());
            return ExecutionResult::InProgress;
        }

        goal.merge_world(self.descriptor.outcomes());
        let Some(output) = world.harvest(pos) else {
            return ExecutionResult::failed(format!("plant has no harvest output at {pos}"));
        };
        if let Some(empty) = output.iter().find(|s| s.amount < 1) {
            tracing::error!(
                agent = agent.id.0,
                material = empty.material.0,
                %pos,
                "harvested an empty stack"
            );
            return ExecutionResult::failed(format!("harvested an empty stack at {pos}"));
        }
        let drop_at = world.harvest_output_pos(pos);
        for stack in output.into_iter().rev() {
            world.spawn_material(stack, drop_at);
        }
        ExecutionResult::Success
    }
}
