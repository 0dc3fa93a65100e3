//! Umbrella crate that re-exports the `goap-*` building blocks.
//!
//! Enable only the layers you need; `full` (the default) pulls in everything.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use goap_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use goap_tools as tools;

#[cfg(feature = "goals")]
#[cfg_attr(docsrs, doc(cfg(feature = "goals")))]
pub use goap_goals as goals;

#[cfg(feature = "actions")]
#[cfg_attr(docsrs, doc(cfg(feature = "actions")))]
pub use goap_actions as actions;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use goap_planner as planner;

/// The types most hosts touch.
#[cfg(feature = "full")]
pub mod prelude {
    pub use goap_actions::{
        Action, ActionConfig, ActionContext, ActionDescriptor, ActionId, ActionRegistry,
        ActionWorld, Agent, CapabilitySnapshot, ExecutionResult, GoalCoordinator,
    };
    pub use goap_core::{AgentId, AiVar, Pos, TickContext, WorldState};
    pub use goap_goals::{Goal, GoalCategory, GoalId, GoalState, Target};
    pub use goap_planner::{GoapPlanner, PlanCandidate};
}
