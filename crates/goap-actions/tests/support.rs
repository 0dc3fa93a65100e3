mod common;

use common::ToyWorld;
use goap_actions::ids::jobs;
use goap_actions::support::{
    fail_with_notify_lack_of, failed_lack_of_material, failed_nav_to_target,
    failed_nav_to_target_without_store, failed_unreachable_storage, is_near_target,
    try_go_to_once, try_walk_away,
};
use goap_actions::{ActionStatus, IconId, MaterialId, PathFlags};
use goap_core::{Footprint, Pos};
use goap_goals::{EntityId, Goal, GoalCategory, GoalId, Target};

const STEEL: MaterialId = MaterialId::named("Steel");

#[test]
fn near_multi_tile_target() {
    let target = Target::Tile {
        pos: Pos::new(0, 0),
        footprint: Footprint::new(3, 2),
    };
    assert!(is_near_target(Pos::new(3, 1), &target));
    assert!(is_near_target(Pos::new(1, -1), &target));
    assert!(is_near_target(Pos::new(1, 1), &target));
    assert!(!is_near_target(Pos::new(4, 1), &target));
    assert!(!is_near_target(Pos::new(0, 3), &target));
}

#[test]
fn go_to_once_only_issues_one_request() {
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let target = Target::tile(Pos::new(5, 5));

    assert!(try_go_to_once(&mut world, &mut agent, &target, true));
    assert!(!try_go_to_once(&mut world, &mut agent, &target, true));
    assert_eq!(world.path_requests.len(), 1);
    assert_eq!(agent.blackboard.move_target, Some(Pos::new(5, 5)));

    agent.blackboard.finish_move();
    let entity = Target::Entity {
        id: EntityId(9),
        pos: Pos::new(1, 1),
    };
    assert!(try_go_to_once(&mut world, &mut agent, &entity, false));
    let (_, to, flags) = world.path_requests[1];
    assert_eq!(to, Pos::new(1, 1));
    assert!(flags.contains(PathFlags::ADJ_ON_TOP | PathFlags::ADJ_NEARBY | PathFlags::TEMP_DESTINATION));
    assert!(!world.path_requests[0].2.contains(PathFlags::TEMP_DESTINATION));
}

#[test]
fn failed_path_request_is_not_in_flight() {
    let mut world = ToyWorld::new();
    world.can_path = false;
    let mut agent = common::agent(1, common::builder_caps());
    assert!(!try_go_to_once(&mut world, &mut agent, &Target::Position(Pos::new(2, 2)), true));
    assert!(!agent.blackboard.move_in_flight);
}

#[test]
fn walk_away_forces_walk_to_safe_spot() {
    let mut world = ToyWorld::new();
    let agent = common::agent(1, common::builder_caps());
    assert!(!try_walk_away(&mut world, &agent));

    world.safe_spot = Some(Pos::new(8, 8));
    assert!(try_walk_away(&mut world, &agent));
    assert_eq!(world.forced_walks, vec![agent.id]);
}

#[test]
fn nav_failure_severity_depends_on_goal_and_mobility() {
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let colony = Goal::new(GoalId(1), jobs::DEMOLITION, GoalCategory::Colony, Target::tile(Pos::new(3, 3)));
    let personal = Goal::new(GoalId(2), jobs::DEMOLITION, GoalCategory::Personal, Target::tile(Pos::new(3, 3)));
    agent.blackboard.move_target = Some(Pos::new(3, 3));

    assert_eq!(failed_nav_to_target(&mut world, &agent, &colony).status(), ActionStatus::FailedSoft);
    assert_eq!(failed_nav_to_target(&mut world, &agent, &personal).status(), ActionStatus::Failed);
    assert_eq!(world.nav_failures.len(), 2);

    world.flying.insert(agent.id);
    assert_eq!(failed_nav_to_target(&mut world, &agent, &colony).status(), ActionStatus::Failed);
    assert_eq!(failed_nav_to_target_without_store(&mut world, &agent).status(), ActionStatus::Failed);

    agent.blackboard.move_target = None;
    world.flying.clear();
    assert_eq!(failed_nav_to_target(&mut world, &agent, &colony).status(), ActionStatus::FailedSoft);
    assert_eq!(world.nav_failures.len(), 3);
}

#[test]
fn unreachable_storage_stores_failure() {
    let mut world = ToyWorld::new();
    let agent = common::agent(1, common::builder_caps());
    let result = failed_unreachable_storage(&mut world, &agent, Pos::new(7, 7));
    assert_eq!(result.status(), ActionStatus::FailedSoft);
    assert_eq!(world.nav_failures, vec![(agent.id, Pos::new(7, 7), None)]);
}

#[test]
fn lack_of_material_notifies_only_real_deficits() {
    let mut world = ToyWorld::new();
    world.stock.insert(STEEL, 5);

    let result = fail_with_notify_lack_of(&mut world, STEEL, 3, true);
    assert_eq!(result.icon(), Some(IconId::LACKING_MATERIALS));
    assert!(world.deficits.is_empty());

    fail_with_notify_lack_of(&mut world, STEEL, 10, false);
    assert!(world.deficits.is_empty());

    fail_with_notify_lack_of(&mut world, STEEL, 10, true);
    assert_eq!(world.deficits, vec![(STEEL, 10)]);
    assert_eq!(failed_lack_of_material(STEEL).status(), ActionStatus::Failed);
}
