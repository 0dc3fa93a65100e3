use goap_core::TickContext;
use goap_goals::Goal;

use crate::{cost, ActionConfig, ActionDescriptor, ActionId, ActionWorld, Agent, ExecutionResult};

/// Per-tick inputs shared by every action call.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub tick: TickContext,
    pub config: &'a ActionConfig,
}

impl<'a> ActionContext<'a> {
    pub fn new(tick: TickContext, config: &'a ActionConfig) -> Self {
        Self { tick, config }
    }

    pub fn now(&self) -> u64 {
        self.tick.tick
    }
}

/// One action type.
///
/// A single instance is shared by every agent, possibly from several threads,
/// so implementations take `&self` and keep anything that must survive
/// between ticks in [`Agent::blackboard`].
///
/// `execute` is called once per tick while the action is current. It must be
/// idempotent while it keeps returning [`ExecutionResult::InProgress`]: repeat
/// calls only advance the agent's own progress.
pub trait Action: Send + Sync {
    fn descriptor(&self) -> &ActionDescriptor;

    fn id(&self) -> ActionId {
        self.descriptor().id()
    }

    fn execute(
        &self,
        cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
        goal: &Goal,
    ) -> ExecutionResult;

    /// Planner cost. Defaults to pricing by goal category.
    fn cost_for(&self, cx: &ActionContext<'_>, agent: &mut Agent, goal: &Goal) -> f32 {
        cost::default_cost_for(self.descriptor(), &agent.capabilities, goal, cx.now())
    }

    /// The action becomes current for `goal`. Not called when resuming after a load.
    fn on_activate(
        &self,
        _cx: &ActionContext<'_>,
        _world: &mut dyn ActionWorld,
        agent: &mut Agent,
        _goal: &Goal,
    ) {
        agent.blackboard.reset_scratch();
    }

    /// The action stops being current, for whatever reason.
    fn on_deactivate(
        &self,
        _cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
        _goal: &Goal,
    ) {
        agent.blackboard.reset_scratch();
        agent.blackboard.clear_fx(world);
    }

    /// Pre-empted by something with higher priority. Followed by `on_deactivate`.
    fn on_interrupt(
        &self,
        _cx: &ActionContext<'_>,
        _world: &mut dyn ActionWorld,
        _agent: &mut Agent,
        _goal: &Goal,
    ) {
    }

    /// Re-attached to a goal restored from a save.
    fn after_load(
        &self,
        _cx: &ActionContext<'_>,
        _world: &mut dyn ActionWorld,
        _agent: &mut Agent,
        _goal: &Goal,
    ) {
    }
}
