mod common;

use std::sync::{Arc, Mutex};

use common::{Site, ToyWorld};
use goap_actions::catalog::Deconstruct;
use goap_actions::ids::jobs;
use goap_actions::{
    tick_workers, AbilityRegistry, Action, ActionConfig, ActionContext, ActionDescriptor,
    ActionId, ActionStatus, ActionWorld, Agent, CoordinatorError, ExecutionResult, FxHandle,
    GoalCoordinator, Worker,
};
use goap_core::{AgentId, Pos, TickContext};
use goap_goals::{Goal, GoalState};
use goap_tools::{TraceLog, TRACE_LOG};

/// Records hook calls and replays a fixed script of results.
struct Scripted {
    descriptor: ActionDescriptor,
    script: Mutex<Vec<ExecutionResult>>,
    calls: Mutex<Vec<&'static str>>,
}

impl Scripted {
    fn new(script: Vec<ExecutionResult>) -> Self {
        Self {
            descriptor: ActionDescriptor::new(ActionId::new("Scripted")).without_required_abilities(),
            script: Mutex::new(script.into_iter().rev().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl Action for Scripted {
    fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }

    fn execute(
        &self,
        _cx: &ActionContext<'_>,
        _world: &mut dyn ActionWorld,
        agent: &mut Agent,
        _goal: &Goal,
    ) -> ExecutionResult {
        self.record("execute");
        agent.blackboard.fx.get_or_insert(FxHandle(42));
        self.script
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(ExecutionResult::InProgress)
    }

    fn on_activate(&self, _: &ActionContext<'_>, _: &mut dyn ActionWorld, _: &mut Agent, _: &Goal) {
        self.record("activate");
    }

    fn on_deactivate(
        &self,
        _: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
        _: &Goal,
    ) {
        self.record("deactivate");
        agent.blackboard.clear_fx(world);
    }

    fn on_interrupt(&self, _: &ActionContext<'_>, _: &mut dyn ActionWorld, _: &mut Agent, _: &Goal) {
        self.record("interrupt");
    }

    fn after_load(&self, _: &ActionContext<'_>, _: &mut dyn ActionWorld, _: &mut Agent, _: &Goal) {
        self.record("after_load");
    }
}

fn cx(config: &ActionConfig, tick: u64) -> ActionContext<'_> {
    common::init_tracing();
    ActionContext::new(TickContext::new(tick, 0), config)
}

#[test]
fn lifecycle_runs_hooks_in_order_and_completes_goal() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    agent.blackboard.extra.set(TRACE_LOG, TraceLog::default());
    let goal = common::tile_goal(1, jobs::DEMOLITION, Pos::new(0, 0));
    let action = Arc::new(Scripted::new(vec![
        ExecutionResult::InProgress,
        ExecutionResult::Success,
    ]));
    let mut coordinator = GoalCoordinator::new();

    coordinator
        .assign(&cx(&config, 1), &mut world, &mut agent, Arc::clone(&goal), action.clone())
        .expect("claim");
    assert_eq!(goal.agent(), Some(agent.id));
    assert_eq!(goal.state(), GoalState::Active);

    let r1 = coordinator.tick(&cx(&config, 2), &mut world, &mut agent);
    assert_eq!(r1, Some(ExecutionResult::InProgress));
    assert!(!coordinator.is_idle());

    let r2 = coordinator.tick(&cx(&config, 3), &mut world, &mut agent);
    assert_eq!(r2, Some(ExecutionResult::Success));
    assert!(coordinator.is_idle());
    assert_eq!(goal.state(), GoalState::Completed);
    assert_eq!(goal.state_changed_at(), 3);
    assert_eq!(action.calls(), vec!["activate", "execute", "execute", "deactivate"]);
    assert_eq!(world.released_fx, vec![FxHandle(42)]);
    assert_eq!(
        coordinator.take_just_finished(goal.id()),
        Some((ActionId::new("Scripted"), ActionStatus::Success))
    );

    let log = agent.blackboard.extra.get(TRACE_LOG).expect("trace log");
    assert_eq!(log.tags(), vec!["activate", "success"]);

    // Idle coordinators do nothing.
    assert_eq!(coordinator.tick(&cx(&config, 4), &mut world, &mut agent), None);
}

#[test]
fn failures_release_goal_with_mapped_state() {
    let config = ActionConfig::default();
    let cases = [
        (ExecutionResult::failed("x"), GoalState::Failed),
        (ExecutionResult::failed_soft("x"), GoalState::Failed),
        (ExecutionResult::error("x"), GoalState::Failed),
        (ExecutionResult::cancelled("x"), GoalState::Cancelled),
        (ExecutionResult::needs_replan("x"), GoalState::Pending),
        (ExecutionResult::put_back("x"), GoalState::Pending),
    ];
    for (i, (result, expected)) in cases.into_iter().enumerate() {
        let mut world = ToyWorld::new();
        let mut agent = common::agent(1, common::builder_caps());
        let goal = common::tile_goal(i as u64 + 1, jobs::DEMOLITION, Pos::new(0, 0));
        let action = Arc::new(Scripted::new(vec![result.clone()]));
        let mut coordinator = GoalCoordinator::new();
        coordinator
            .assign(&cx(&config, 0), &mut world, &mut agent, Arc::clone(&goal), action)
            .expect("claim");

        assert_eq!(coordinator.tick(&cx(&config, 1), &mut world, &mut agent), Some(result));
        assert_eq!(goal.state(), expected);
        assert!(goal.is_unassigned());
    }
}

#[test]
fn assign_rejects_goal_held_by_someone_else() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let goal = common::tile_goal(1, jobs::DEMOLITION, Pos::new(0, 0));
    assert!(goal.try_set_agent(AgentId(2)));

    let err = GoalCoordinator::new()
        .assign(
            &cx(&config, 0),
            &mut world,
            &mut agent,
            Arc::clone(&goal),
            Arc::new(Scripted::new(Vec::new())),
        )
        .unwrap_err();
    assert_eq!(err, CoordinatorError::GoalAlreadyClaimed(goal.id()));
}

#[test]
fn rejected_assign_leaves_running_action_untouched() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let running = common::tile_goal(1, jobs::DEMOLITION, Pos::new(0, 0));
    let taken = common::tile_goal(2, jobs::DEMOLITION, Pos::new(3, 0));
    assert!(taken.try_set_agent(AgentId(2)));
    let action = Arc::new(Scripted::new(Vec::new()));
    let mut coordinator = GoalCoordinator::new();
    coordinator
        .assign(&cx(&config, 0), &mut world, &mut agent, Arc::clone(&running), action.clone())
        .expect("claim");
    assert_eq!(
        coordinator.tick(&cx(&config, 1), &mut world, &mut agent),
        Some(ExecutionResult::InProgress)
    );

    let err = coordinator
        .assign(
            &cx(&config, 2),
            &mut world,
            &mut agent,
            Arc::clone(&taken),
            Arc::new(Scripted::new(Vec::new())),
        )
        .unwrap_err();

    assert_eq!(err, CoordinatorError::GoalAlreadyClaimed(taken.id()));
    assert!(!coordinator.is_idle());
    assert_eq!(coordinator.current_goal().map(|g| g.id()), Some(running.id()));
    assert_eq!(running.agent(), Some(agent.id));
    assert_eq!(running.state(), GoalState::Active);
    assert_eq!(taken.agent(), Some(AgentId(2)));
    assert_eq!(action.calls(), vec!["activate", "execute"]);
}

#[test]
fn reassigning_the_running_goal_keeps_the_claim() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let goal = common::tile_goal(1, jobs::DEMOLITION, Pos::new(0, 0));
    let first = Arc::new(Scripted::new(Vec::new()));
    let second = Arc::new(Scripted::new(Vec::new()));
    let mut coordinator = GoalCoordinator::new();
    coordinator
        .assign(&cx(&config, 0), &mut world, &mut agent, Arc::clone(&goal), first.clone())
        .expect("claim");
    coordinator
        .assign(&cx(&config, 1), &mut world, &mut agent, Arc::clone(&goal), second.clone())
        .expect("still ours");

    assert_eq!(first.calls(), vec!["activate", "interrupt", "deactivate"]);
    assert_eq!(second.calls(), vec!["activate"]);
    assert_eq!(goal.agent(), Some(agent.id));
    assert_eq!(goal.state(), GoalState::Active);
}

#[test]
fn interrupt_calls_interrupt_then_deactivate_and_releases() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let goal = common::tile_goal(1, jobs::DEMOLITION, Pos::new(0, 0));
    let action = Arc::new(Scripted::new(Vec::new()));
    let mut coordinator = GoalCoordinator::new();

    assert_eq!(
        coordinator.interrupt(&cx(&config, 0), &mut world, &mut agent),
        Err(CoordinatorError::NoActiveGoal)
    );
    coordinator
        .assign(&cx(&config, 0), &mut world, &mut agent, Arc::clone(&goal), action.clone())
        .expect("claim");
    coordinator.tick(&cx(&config, 1), &mut world, &mut agent);
    coordinator
        .interrupt(&cx(&config, 2), &mut world, &mut agent)
        .expect("running");

    assert_eq!(action.calls(), vec!["activate", "execute", "interrupt", "deactivate"]);
    assert!(goal.is_unassigned());
    assert_eq!(goal.state(), GoalState::Pending);
    assert!(coordinator.is_idle());
}

#[test]
fn resume_after_load_skips_activation() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let goal = common::tile_goal(1, jobs::DEMOLITION, Pos::new(0, 0));
    assert!(goal.try_set_agent(agent.id));
    let action = Arc::new(Scripted::new(vec![ExecutionResult::Success]));
    let mut coordinator = GoalCoordinator::new();

    coordinator
        .resume_after_load(&cx(&config, 9), &mut world, &mut agent, Arc::clone(&goal), action.clone())
        .expect("own goal");
    coordinator.tick(&cx(&config, 10), &mut world, &mut agent);
    assert_eq!(action.calls(), vec!["after_load", "execute", "deactivate"]);
}

#[test]
fn streamlined_goal_is_queued_after_success() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let first_pos = Pos::new(4, 4);
    let second_pos = Pos::new(5, 4);
    world.place(agent.id, Pos::new(4, 5));
    world.sites.insert(first_pos, Site::wall(0.1));
    world.sites.insert(second_pos, Site::wall(0.1));
    let first = common::tile_goal(1, jobs::DEMOLITION, first_pos);
    let second = common::tile_goal(2, jobs::DEMOLITION, second_pos);
    world.goals.insert(Arc::clone(&first));
    world.goals.insert(Arc::clone(&second));

    let action: Arc<dyn Action> = Arc::new(Deconstruct::new(&AbilityRegistry::new()));
    let mut coordinator = GoalCoordinator::new();
    coordinator
        .assign(&cx(&config, 0), &mut world, &mut agent, first, Arc::clone(&action))
        .expect("claim");
    assert!(coordinator.tick(&cx(&config, 1), &mut world, &mut agent).is_some_and(|r| r.is_success()));

    let next = coordinator.take_queued().expect("streamlined");
    assert_eq!(next.id(), second.id());
    coordinator
        .assign(&cx(&config, 2), &mut world, &mut agent, next, action)
        .expect("already ours");
    assert_eq!(second.state(), GoalState::Active);
}

#[test]
fn workers_tick_in_agent_id_order() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut workers: Vec<Worker> = [3u64, 1, 2]
        .into_iter()
        .map(|id| Worker::new(common::agent(id, common::builder_caps())))
        .collect();
    for worker in &mut workers {
        let goal = common::tile_goal(worker.agent.id.0, jobs::DEMOLITION, Pos::new(0, 0));
        worker
            .coordinator
            .assign(
                &cx(&config, 0),
                &mut world,
                &mut worker.agent,
                goal,
                Arc::new(Scripted::new(Vec::new())),
            )
            .expect("claim");
    }

    workers.push(Worker::new(common::agent(4, common::builder_caps())));

    let results = tick_workers(&cx(&config, 1), &mut world, &mut workers);
    let order: Vec<u64> = workers.iter().map(|w| w.agent.id.0).collect();
    assert_eq!(order, vec![1, 2, 3, 4]);
    assert_eq!(
        results,
        vec![
            (AgentId(1), Some(ExecutionResult::InProgress)),
            (AgentId(2), Some(ExecutionResult::InProgress)),
            (AgentId(3), Some(ExecutionResult::InProgress)),
            (AgentId(4), None),
        ]
    );
}

#[test]
fn tick_workers_surfaces_contract_errors() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut worker = Worker::new(common::agent(5, common::builder_caps()));
    let goal = common::tile_goal(1, jobs::DEMOLITION, Pos::new(0, 0));
    worker
        .coordinator
        .assign(
            &cx(&config, 0),
            &mut world,
            &mut worker.agent,
            goal,
            Arc::new(Scripted::new(vec![ExecutionResult::error("wrong target")])),
        )
        .expect("claim");
    let mut workers = vec![worker];

    let results = tick_workers(&cx(&config, 1), &mut world, &mut workers);
    assert_eq!(results.len(), 1);
    let (agent, result) = &results[0];
    assert_eq!(*agent, AgentId(5));
    assert_eq!(result.as_ref().map(ExecutionResult::status), Some(ActionStatus::Error));
}

#[test]
fn assigning_elsewhere_releases_streamlined_queue() {
    let config = ActionConfig::default();
    let mut world = ToyWorld::new();
    let mut agent = common::agent(1, common::builder_caps());
    let first_pos = Pos::new(4, 4);
    let second_pos = Pos::new(5, 4);
    let third_pos = Pos::new(9, 9);
    world.place(agent.id, Pos::new(4, 5));
    world.sites.insert(first_pos, Site::wall(0.1));
    world.sites.insert(second_pos, Site::wall(0.1));
    let first = common::tile_goal(1, jobs::DEMOLITION, first_pos);
    let second = common::tile_goal(2, jobs::DEMOLITION, second_pos);
    let third = common::tile_goal(3, jobs::DEMOLITION, third_pos);
    world.goals.insert(Arc::clone(&first));
    world.goals.insert(Arc::clone(&second));

    let action: Arc<dyn Action> = Arc::new(Deconstruct::new(&AbilityRegistry::new()));
    let mut coordinator = GoalCoordinator::new();
    coordinator
        .assign(&cx(&config, 0), &mut world, &mut agent, first, Arc::clone(&action))
        .expect("claim");
    coordinator.tick(&cx(&config, 1), &mut world, &mut agent);
    assert_eq!(coordinator.queued_len(), 1);
    assert_eq!(second.state(), GoalState::PreAssigned);

    // Sent elsewhere: the neighbour claimed ahead of time goes back to the pool.
    coordinator
        .assign(
            &cx(&config, 2),
            &mut world,
            &mut agent,
            Arc::clone(&third),
            Arc::new(Scripted::new(Vec::new())),
        )
        .expect("claim");
    assert_eq!(coordinator.queued_len(), 0);
    assert!(second.is_unassigned());
    assert_eq!(second.state(), GoalState::Pending);
    assert_eq!(third.agent(), Some(agent.id));
}
