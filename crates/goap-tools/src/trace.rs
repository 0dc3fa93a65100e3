#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use goap_core::{AgentId, BbKey, Blackboard};

/// One recorded step of an agent's action execution.
///
/// Plain data so it can be recorded during simulation and rendered later by
/// tooling. `action` and `goal` are the raw stable ids.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub agent: AgentId,
    pub tag: Cow<'static, str>,
    pub action: u64,
    pub goal: u64,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn new(tick: u64, agent: AgentId, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            agent,
            tag: tag.into(),
            action: 0,
            goal: 0,
            detail: None,
        }
    }

    pub fn with_action(mut self, action: u64) -> Self {
        self.action = action;
        self
    }

    pub fn with_goal(mut self, goal: u64) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

pub trait TraceSink: Send {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn tags(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.tag.as_ref()).collect()
    }
}

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::named("goap.trace.log");
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::named("goap.trace.sink");

/// Record `event` into whichever of [`TRACE_LOG`] / [`TRACE_SINK`] is present.
/// Does nothing when neither is installed.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
