//! Goals, atomic goal claims and spatial goal streamlining.
//!
//! A goal is a pending unit of work bound to a target and a job. It is tracked
//! independently of whichever agent executes it, so it is always handed around
//! as `Arc<Goal>` and every mutable part of it is either atomic or behind a
//! lock.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod board;
pub mod goal;
pub mod streamline;

pub use board::{GoalBoard, GoalMap};
pub use goal::{EntityId, Goal, GoalCategory, GoalFlags, GoalId, GoalState, JobTypeId, Target};
pub use streamline::{streamline_candidates, try_streamline};
