use core::fmt;
use std::borrow::Cow;

pub type Reason = Cow<'static, str>;

/// Icon shown next to a failure in the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(pub u32);

impl IconId {
    pub const LACKING_MATERIALS: IconId = IconId(1);
    pub const UNREACHABLE: IconId = IconId(2);
}

/// Outcome of one execution tick.
///
/// `InProgress` is the only non-terminal variant: "call me again next tick".
/// Every other variant ends the agent's attempt at this action for this goal.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    Success,
    InProgress,
    /// A precondition silently became false; the goal view has been corrected.
    NeedsReplan(Reason),
    Cancelled(Reason),
    /// Hand the goal back to the pool untouched.
    PutBack(Reason),
    /// Hard failure. Do not retry without planner intervention.
    Failed { reason: Reason, icon: Option<IconId> },
    /// Retryable after backing off.
    FailedSoft(Reason),
    /// Contract violation in the calling/planning layer.
    Error(Reason),
}

/// Payload-free discriminant of [`ExecutionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStatus {
    Success,
    InProgress,
    NeedsReplan,
    Cancelled,
    PutBack,
    Failed,
    FailedSoft,
    Error,
}

impl ActionStatus {
    pub fn is_terminal(self) -> bool {
        self != ActionStatus::InProgress
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Success => "success",
            ActionStatus::InProgress => "in_progress",
            ActionStatus::NeedsReplan => "needs_replan",
            ActionStatus::Cancelled => "cancelled",
            ActionStatus::PutBack => "put_back",
            ActionStatus::Failed => "failed",
            ActionStatus::FailedSoft => "failed_soft",
            ActionStatus::Error => "error",
        }
    }
}

impl ExecutionResult {
    pub fn needs_replan(why: impl Into<Reason>) -> Self {
        ExecutionResult::NeedsReplan(why.into())
    }

    pub fn cancelled(why: impl Into<Reason>) -> Self {
        ExecutionResult::Cancelled(why.into())
    }

    pub fn put_back(why: impl Into<Reason>) -> Self {
        ExecutionResult::PutBack(why.into())
    }

    pub fn failed(why: impl Into<Reason>) -> Self {
        ExecutionResult::Failed {
            reason: why.into(),
            icon: None,
        }
    }

    pub fn failed_with_icon(why: impl Into<Reason>, icon: IconId) -> Self {
        ExecutionResult::Failed {
            reason: why.into(),
            icon: Some(icon),
        }
    }

    pub fn failed_soft(why: impl Into<Reason>) -> Self {
        ExecutionResult::FailedSoft(why.into())
    }

    pub fn error(why: impl Into<Reason>) -> Self {
        ExecutionResult::Error(why.into())
    }

    pub fn status(&self) -> ActionStatus {
        match self {
            ExecutionResult::Success => ActionStatus::Success,
            ExecutionResult::InProgress => ActionStatus::InProgress,
            ExecutionResult::NeedsReplan(_) => ActionStatus::NeedsReplan,
            ExecutionResult::Cancelled(_) => ActionStatus::Cancelled,
            ExecutionResult::PutBack(_) => ActionStatus::PutBack,
            ExecutionResult::Failed { .. } => ActionStatus::Failed,
            ExecutionResult::FailedSoft(_) => ActionStatus::FailedSoft,
            ExecutionResult::Error(_) => ActionStatus::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ExecutionResult::Success | ExecutionResult::InProgress => None,
            ExecutionResult::NeedsReplan(r)
            | ExecutionResult::Cancelled(r)
            | ExecutionResult::PutBack(r)
            | ExecutionResult::FailedSoft(r)
            | ExecutionResult::Error(r)
            | ExecutionResult::Failed { reason: r, .. } => Some(r),
        }
    }

    pub fn icon(&self) -> Option<IconId> {
        match self {
            ExecutionResult::Failed { icon, .. } => *icon,
            _ => None,
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{}: {reason}", self.status().as_str()),
            None => f.write_str(self.status().as_str()),
        }
    }
}
