use goap_actions::{ActionContext, ActionRegistry, Agent};
use goap_goals::Goal;

use crate::PlanCandidate;

/// Every registered action `agent` may attempt, priced for `goal`.
///
/// Actions reporting a negative or non-finite cost are skipped.
pub fn candidates_for<'r>(
    registry: &'r ActionRegistry,
    cx: &ActionContext<'_>,
    agent: &mut Agent,
    goal: &Goal,
) -> Vec<PlanCandidate<'r>> {
    let mut out = Vec::new();
    for action in registry.iter() {
        let descriptor = action.descriptor();
        if !descriptor.is_available_for(&agent.capabilities) {
            continue;
        }
        let cost = action.cost_for(cx, agent, goal);
        if !cost.is_finite() || cost < 0.0 {
            tracing::warn!(action = %descriptor.id(), cost, "skipping action with invalid cost");
            continue;
        }
        out.push(PlanCandidate::new(descriptor, cost));
    }
    out
}
