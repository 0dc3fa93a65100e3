//! Helpers shared by action implementations: navigation requests and the
//! standard failure results that go with them.

use goap_core::Pos;
use goap_goals::{Goal, GoalCategory, Target};

use crate::{ActionWorld, Agent, ExecutionResult, IconId, MaterialId, PathFlags};

/// The agent is on or next to any tile the target covers.
pub fn is_near_target(at: Pos, target: &Target) -> bool {
    match *target {
        Target::Tile { pos, footprint } => {
            let nearest = Pos::new(
                at.x.clamp(pos.x, pos.x + i32::from(footprint.width.max(1)) - 1),
                at.y.clamp(pos.y, pos.y + i32::from(footprint.height.max(1)) - 1),
            );
            nearest.is_near(at)
        }
        Target::Entity { pos, .. } | Target::Position(pos) => pos.is_near(at),
    }
}

/// Request a path towards `target` unless one is already in flight.
///
/// Records the move target on the blackboard. Tiles accept any adjacent tile,
/// entities also accept standing on top, plain positions only on top. A
/// destination the agent will not stay at is requested as temporary.
pub fn try_go_to_once(
    world: &mut dyn ActionWorld,
    agent: &mut Agent,
    target: &Target,
    will_stay: bool,
) -> bool {
    if agent.blackboard.move_in_flight {
        return false;
    }
    let mut flags = match target {
        Target::Tile { .. } => PathFlags::ADJ_NEARBY,
        Target::Entity { .. } => PathFlags::ADJ_ON_TOP | PathFlags::ADJ_NEARBY,
        Target::Position(_) => PathFlags::ADJ_ON_TOP,
    };
    if !will_stay {
        flags = flags | PathFlags::TEMP_DESTINATION;
    }
    let to = target.pos();
    agent.blackboard.move_target = Some(to);
    let requested = world.try_go_to(agent.id, to, flags);
    agent.blackboard.move_in_flight = requested;
    requested
}

/// Walk to a nearby spot the agent considers safe. Returns false when there is
/// none or it cannot be reached.
pub fn try_walk_away(world: &mut dyn ActionWorld, agent: &Agent) -> bool {
    let at = world.position_of(agent.id);
    let Some(spot) = world.find_safe_spot_near(agent.id, at) else {
        tracing::warn!(agent = agent.id.0, %at, "failed to walk away");
        return false;
    };
    if world.try_go_to(agent.id, spot, PathFlags::ADJ_ON_TOP | PathFlags::ADJ_NEARBY) {
        world.set_forced_walk(agent.id);
        return true;
    }
    false
}

pub fn face_target(world: &mut dyn ActionWorld, agent: &Agent, target: &Target) {
    world.face(agent.id, target.pos());
}

/// Navigation to the recorded move target failed.
pub fn failed_nav_to_target(
    world: &mut dyn ActionWorld,
    agent: &Agent,
    goal: &Goal,
) -> ExecutionResult {
    failed_nav_to_target_at(world, agent, goal, agent.blackboard.move_target, true)
}

/// Navigation to `pos` failed. Stores the failure so the planner avoids the
/// spot; grounded colony workers may retry later, everyone else fails hard.
pub fn failed_nav_to_target_at(
    world: &mut dyn ActionWorld,
    agent: &Agent,
    goal: &Goal,
    pos: Option<Pos>,
    err_on_invalid: bool,
) -> ExecutionResult {
    let Some(pos) = pos else {
        if err_on_invalid {
            tracing::error!(
                agent = agent.id.0,
                goal = goal.id().0,
                "trying to store nav failure without a position"
            );
        }
        return failed_nav_to_target_without_store(world, agent);
    };
    world.store_nav_failure(agent.id, pos, None);
    let text = format!("unreachable {pos} ({})", agent.name);
    if goal.category() == GoalCategory::Colony && world.is_grounded(agent.id) {
        ExecutionResult::failed_soft(text)
    } else {
        ExecutionResult::failed(text)
    }
}

pub fn failed_nav_to_target_without_store(
    world: &mut dyn ActionWorld,
    agent: &Agent,
) -> ExecutionResult {
    let text = format!("unreachable ({})", agent.name);
    if world.is_grounded(agent.id) {
        ExecutionResult::failed_soft(text)
    } else {
        ExecutionResult::failed(text)
    }
}

pub fn failed_nav_to_material(
    world: &mut dyn ActionWorld,
    agent: &Agent,
    pos: Pos,
) -> ExecutionResult {
    if world.is_grounded(agent.id) {
        ExecutionResult::failed_soft(format!(
            "material unreachable on foot {pos} ({})",
            agent.name
        ))
    } else {
        ExecutionResult::failed(format!("material unreachable in flight {pos} ({})", agent.name))
    }
}

pub fn failed_unreachable_storage(
    world: &mut dyn ActionWorld,
    agent: &Agent,
    pos: Pos,
) -> ExecutionResult {
    world.store_nav_failure(agent.id, pos, None);
    failed_nav_to_material(world, agent, pos)
}

/// Fail for lack of `material`, telling the requester about the deficit when
/// the colony really is short. Pass `notify = false` for requesters that
/// don't track deficits.
pub fn fail_with_notify_lack_of(
    world: &mut dyn ActionWorld,
    material: MaterialId,
    amount: u32,
    notify: bool,
) -> ExecutionResult {
    if notify && !world.has_enough(material, amount) {
        world.notify_deficit(material, amount);
    }
    failed_lack_of_material(material)
}

pub fn failed_lack_of_material(material: MaterialId) -> ExecutionResult {
    ExecutionResult::failed_with_icon(
        format!("lacking material {:016x}", material.0),
        IconId::LACKING_MATERIALS,
    )
}
