//! Stateless action descriptors, capability gating and the tick execution protocol.
//!
//! One [`Action`] instance per action type is shared by every agent. Anything
//! that has to survive between ticks lives in the agent's
//! [`AgentBlackboard`], never in the action.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
pub mod capability;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod cost;
pub mod descriptor;
pub mod error;
pub mod ids;
pub mod registry;
pub mod result;
pub mod support;
pub mod world;

pub use action::{Action, ActionContext};
pub use agent::{Agent, AgentBlackboard, FxHandle};
pub use capability::{
    AbilityId, AbilityRegistry, AbilityRequirements, CapabilitySnapshot, JobSlot, NeedId,
    StatFlags,
};
pub use config::ActionConfig;
pub use coordinator::{tick_workers, GoalCoordinator, Worker};
pub use descriptor::{ActionDescriptor, ActionId};
pub use error::{ConfigError, CoordinatorError, RegistryError};
pub use registry::ActionRegistry;
pub use result::{ActionStatus, ExecutionResult, IconId};
pub use world::{
    ActionWorld, Inventory, MaterialId, MaterialStack, Navigation, PathFlags, Presentation,
    WorkTargetKind, Worksites,
};
