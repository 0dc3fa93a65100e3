//! Opportunistic merging of adjacent equivalent goals onto one agent.
//!
//! Greedy and O(neighbourhood): the first unassigned neighbour with the same
//! job wins. Not a matching algorithm.

use std::sync::Arc;

use goap_core::{AgentId, Pos};

use crate::{Goal, GoalBoard, GoalFlags, GoalState, Target};

/// Tiles to inspect around a goal's target: the outline for multi-tile
/// targets, the 4-neighbourhood otherwise. Non-tile targets never streamline.
pub fn streamline_candidates(target: &Target) -> Vec<Pos> {
    match *target {
        Target::Tile { pos, footprint } if footprint.is_multi() => footprint.outline(pos),
        Target::Tile { pos, .. } => pos.neighbors4().to_vec(),
        Target::Entity { .. } | Target::Position(_) => Vec::new(),
    }
}

/// Try to claim a neighbouring goal of the same job for `agent`.
///
/// On success both goals are flagged [`GoalFlags::STREAMLINED`], the claimed
/// goal moves to [`GoalState::PreAssigned`] and is returned.
pub fn try_streamline(
    board: &dyn GoalBoard,
    agent: AgentId,
    goal: &Goal,
    tick: u64,
) -> Option<Arc<Goal>> {
    streamline_candidates(goal.target())
        .into_iter()
        .find_map(|pos| try_streamline_at(board, pos, agent, goal, tick))
}

fn try_streamline_at(
    board: &dyn GoalBoard,
    pos: Pos,
    agent: AgentId,
    goal: &Goal,
    tick: u64,
) -> Option<Arc<Goal>> {
    let neighbor = board.goal_at(pos)?;
    if neighbor.id() == goal.id()
        || neighbor.job() != goal.job()
        || !neighbor.is_unassigned()
        || !neighbor.state().is_open()
    {
        return None;
    }
    if !neighbor.try_set_agent(agent) {
        return None;
    }
    goal.add_flags(GoalFlags::STREAMLINED);
    neighbor.change_state_to(GoalState::PreAssigned, tick);
    neighbor.add_flags(GoalFlags::STREAMLINED);
    tracing::debug!(
        agent = agent.0,
        from = goal.id().0,
        to = neighbor.id().0,
        %pos,
        "streamlined goal"
    );
    Some(neighbor)
}
