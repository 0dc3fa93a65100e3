//! Deterministic planner producing `goap-core` plan specs from action descriptors.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod candidates;
pub mod planner;

pub use candidates::candidates_for;
pub use planner::{GoapPlanner, GoapPlannerConfig, PlanCandidate};
