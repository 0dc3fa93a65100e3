//! Drives one agent's current action against its goal.
//!
//! The coordinator owns the lifecycle: it claims goals, calls the hooks in
//! order, executes exactly once per tick and maps terminal results onto the
//! goal's state.

use std::collections::VecDeque;
use std::sync::Arc;

use goap_core::AgentId;
use goap_goals::{Goal, GoalId, GoalState};
use goap_tools::{emit, TraceEvent};

use crate::{
    Action, ActionContext, ActionId, ActionStatus, ActionWorld, Agent, CoordinatorError,
    ExecutionResult,
};

struct Running {
    action: Arc<dyn Action>,
    goal: Arc<Goal>,
}

#[derive(Default)]
pub struct GoalCoordinator {
    current: Option<Running>,
    queued: VecDeque<Arc<Goal>>,
    just_finished: Option<(ActionId, GoalId, ActionStatus)>,
}

impl GoalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_goal(&self) -> Option<&Arc<Goal>> {
        self.current.as_ref().map(|r| &r.goal)
    }

    pub fn current_action(&self) -> Option<ActionId> {
        self.current.as_ref().map(|r| r.action.id())
    }

    /// Start `action` on `goal`. Interrupts whatever was running and releases
    /// every other queued goal.
    ///
    /// A goal already held by this agent (e.g. claimed by streamlining) is
    /// taken over; a goal held by anyone else is rejected and nothing changes.
    pub fn assign(
        &mut self,
        cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
        goal: Arc<Goal>,
        action: Arc<dyn Action>,
    ) -> Result<(), CoordinatorError> {
        if goal.agent() != Some(agent.id) && !goal.try_set_agent(agent.id) {
            return Err(CoordinatorError::GoalAlreadyClaimed(goal.id()));
        }
        self.queued.retain(|q| q.id() != goal.id());
        if self.current.is_some() {
            self.interrupt(cx, world, agent)?;
            // Interrupting the goal being reassigned hands it back; take it again.
            if goal.agent() != Some(agent.id) && !goal.try_set_agent(agent.id) {
                return Err(CoordinatorError::GoalAlreadyClaimed(goal.id()));
            }
        }
        self.release_queued(cx, agent);
        self.just_finished = None;

        action.on_activate(cx, world, agent, &goal);
        goal.change_state_to(GoalState::Active, cx.now());
        agent.mark_action_started(cx.now());
        tracing::debug!(
            agent = agent.id.0,
            action = %action.id(),
            goal = goal.id().0,
            "activated"
        );
        trace(cx, agent, "activate", action.id(), &goal, None);
        self.current = Some(Running { action, goal });
        Ok(())
    }

    /// Execute the current action once. `None` when idle.
    pub fn tick(
        &mut self,
        cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
    ) -> Option<ExecutionResult> {
        let running = self.current.as_ref()?;
        let result = running.action.execute(cx, world, agent, &running.goal);
        if !result.is_terminal() {
            return Some(result);
        }

        let Running { action, goal } = self.current.take()?;
        action.on_deactivate(cx, world, agent, &goal);
        agent.clear_action_started();

        let status = result.status();
        let next = match status {
            ActionStatus::Success => GoalState::Completed,
            ActionStatus::Cancelled => GoalState::Cancelled,
            ActionStatus::Failed | ActionStatus::FailedSoft | ActionStatus::Error => {
                GoalState::Failed
            }
            ActionStatus::NeedsReplan | ActionStatus::PutBack | ActionStatus::InProgress => {
                GoalState::Pending
            }
        };
        if status != ActionStatus::Success {
            goal.release_agent(agent.id);
        }
        goal.change_state_to(next, cx.now());

        if let Some(neighbor) = agent.blackboard.streamlined_next.take() {
            if status == ActionStatus::Success {
                self.queued.push_back(neighbor);
            } else {
                neighbor.release_agent(agent.id);
                neighbor.change_state_to(GoalState::Pending, cx.now());
            }
        }

        if action.descriptor().is_quiet() {
            tracing::debug!(agent = agent.id.0, action = %action.id(), goal = goal.id().0, %result, "finished");
        } else {
            tracing::info!(agent = agent.id.0, action = %action.id(), goal = goal.id().0, %result, "finished");
        }
        trace(cx, agent, status.as_str(), action.id(), &goal, result.reason());
        self.just_finished = Some((action.id(), goal.id(), status));
        Some(result)
    }

    /// Pre-empt the current action and hand its goal back to the pool, along
    /// with any goals queued by streamlining.
    pub fn interrupt(
        &mut self,
        cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
    ) -> Result<(), CoordinatorError> {
        let Running { action, goal } = self.current.take().ok_or(CoordinatorError::NoActiveGoal)?;
        action.on_interrupt(cx, world, agent, &goal);
        action.on_deactivate(cx, world, agent, &goal);
        agent.clear_action_started();
        goal.release_agent(agent.id);
        goal.change_state_to(GoalState::Pending, cx.now());
        tracing::debug!(
            agent = agent.id.0,
            action = %action.id(),
            goal = goal.id().0,
            "interrupted"
        );
        trace(cx, agent, "interrupt", action.id(), &goal, None);
        self.release_queued(cx, agent);
        self.just_finished = None;
        Ok(())
    }

    fn release_queued(&mut self, cx: &ActionContext<'_>, agent: &Agent) {
        for queued in self.queued.drain(..) {
            if queued.release_agent(agent.id) {
                queued.change_state_to(GoalState::Pending, cx.now());
            }
            tracing::debug!(agent = agent.id.0, goal = queued.id().0, "released queued goal");
        }
    }

    /// Re-attach a restored goal without running `on_activate`.
    pub fn resume_after_load(
        &mut self,
        cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
        agent: &mut Agent,
        goal: Arc<Goal>,
        action: Arc<dyn Action>,
    ) -> Result<(), CoordinatorError> {
        if goal.agent() != Some(agent.id) && !goal.try_set_agent(agent.id) {
            return Err(CoordinatorError::GoalAlreadyClaimed(goal.id()));
        }
        action.after_load(cx, world, agent, &goal);
        goal.change_state_to(GoalState::Active, cx.now());
        agent.mark_action_started(cx.now());
        trace(cx, agent, "resume", action.id(), &goal, None);
        self.current = Some(Running { action, goal });
        Ok(())
    }

    /// Next goal claimed ahead of time, if any.
    pub fn take_queued(&mut self) -> Option<Arc<Goal>> {
        self.queued.pop_front()
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    pub fn take_just_finished(&mut self, goal: GoalId) -> Option<(ActionId, ActionStatus)> {
        match self.just_finished {
            Some((action, finished, status)) if finished == goal => {
                self.just_finished = None;
                Some((action, status))
            }
            _ => None,
        }
    }
}

fn trace(
    cx: &ActionContext<'_>,
    agent: &mut Agent,
    tag: &'static str,
    action: ActionId,
    goal: &Goal,
    detail: Option<&str>,
) {
    if !cx.config.trace.enabled {
        return;
    }
    let mut event = TraceEvent::new(cx.now(), agent.id, tag)
        .with_action(action.hash())
        .with_goal(goal.id().0);
    if let Some(detail) = detail {
        event = event.with_detail(detail);
    }
    emit(&mut agent.blackboard.extra, event);
}

/// An agent paired with its coordinator.
pub struct Worker {
    pub agent: Agent,
    pub coordinator: GoalCoordinator,
}

impl Worker {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent,
            coordinator: GoalCoordinator::new(),
        }
    }

    pub fn tick(
        &mut self,
        cx: &ActionContext<'_>,
        world: &mut dyn ActionWorld,
    ) -> Option<ExecutionResult> {
        self.coordinator.tick(cx, world, &mut self.agent)
    }
}

/// Tick every worker once, in stable agent-id order.
///
/// Returns each worker's result in the same order; `None` for idle workers.
pub fn tick_workers(
    cx: &ActionContext<'_>,
    world: &mut dyn ActionWorld,
    workers: &mut [Worker],
) -> Vec<(AgentId, Option<ExecutionResult>)> {
    workers.sort_by_key(|w| w.agent.id.stable_id());
    workers
        .iter_mut()
        .map(|worker| (worker.agent.id, worker.tick(cx, world)))
        .collect()
}
