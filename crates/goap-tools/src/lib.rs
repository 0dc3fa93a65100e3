//! Tooling primitives for goal-directed action planning.
//!
//! Execution traces are recorded into the agent's own blackboard so they can be
//! inspected after a simulation run without a global logger.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink, TRACE_LOG, TRACE_SINK,
};
