use core::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use goap_core::{stable_hash, AgentId, AiVar, FactValue, Footprint, Pos, WorldState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GoalId(pub u64);

/// Job type id, hashed from the job's stable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JobTypeId(pub u64);

impl JobTypeId {
    pub const NONE: JobTypeId = JobTypeId(0);

    pub const fn named(name: &str) -> Self {
        Self(stable_hash(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(pub u64);

/// What kind of work a goal represents. Drives the default action cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GoalCategory {
    /// Colony chores, ranked by the worker's job skill.
    Colony,
    Personal,
    Combat,
    Idle,
}

/// The thing a goal is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Target {
    Tile { pos: Pos, footprint: Footprint },
    Entity { id: EntityId, pos: Pos },
    Position(Pos),
}

impl Target {
    pub fn tile(pos: Pos) -> Self {
        Target::Tile {
            pos,
            footprint: Footprint::SINGLE,
        }
    }

    pub fn pos(&self) -> Pos {
        match *self {
            Target::Tile { pos, .. } | Target::Entity { pos, .. } | Target::Position(pos) => pos,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Target::Tile { .. } => "tile",
            Target::Entity { .. } => "entity",
            Target::Position(_) => "position",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Tile { pos, footprint } if footprint.is_multi() => {
                write!(f, "tile{pos}[{}x{}]", footprint.width, footprint.height)
            }
            Target::Tile { pos, .. } => write!(f, "tile{pos}"),
            Target::Entity { id, pos } => write!(f, "entity#{}@{pos}", id.0),
            Target::Position(pos) => write!(f, "pos{pos}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GoalState {
    Pending,
    /// Claimed ahead of time (e.g. by streamlining) but not started.
    PreAssigned,
    Active,
    Completed,
    Failed,
    Cancelled,
}

impl GoalState {
    pub fn is_open(self) -> bool {
        matches!(
            self,
            GoalState::Pending | GoalState::PreAssigned | GoalState::Active
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct GoalFlags(u8);

impl GoalFlags {
    pub const NONE: GoalFlags = GoalFlags(0);
    /// Bookkeeping only: this goal was merged with a neighbour.
    pub const STREAMLINED: GoalFlags = GoalFlags(1 << 0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: GoalFlags) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl core::ops::BitOr for GoalFlags {
    type Output = GoalFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        GoalFlags(self.0 | rhs.0)
    }
}

/// A unit of work bound to a target and a job.
///
/// The assigned agent is a single atomic word (`0` = unassigned) so that two
/// agents racing for the same goal resolve through one compare-and-swap.
#[derive(Debug)]
pub struct Goal {
    id: GoalId,
    job: JobTypeId,
    category: GoalCategory,
    target: Target,
    agent: AtomicU64,
    flags: AtomicU8,
    state: Mutex<(GoalState, u64)>,
    world: RwLock<WorldState>,
}

impl Goal {
    pub fn new(id: GoalId, job: JobTypeId, category: GoalCategory, target: Target) -> Self {
        Self {
            id,
            job,
            category,
            target,
            agent: AtomicU64::new(AgentId::NONE.0),
            flags: AtomicU8::new(GoalFlags::NONE.bits()),
            state: Mutex::new((GoalState::Pending, 0)),
            world: RwLock::new(WorldState::empty()),
        }
    }

    /// Seed the goal's projected world view.
    pub fn with_world_state(self, state: WorldState) -> Self {
        *self.world.write().unwrap_or_else(PoisonError::into_inner) = state;
        self
    }

    pub fn id(&self) -> GoalId {
        self.id
    }

    pub fn job(&self) -> JobTypeId {
        self.job
    }

    pub fn category(&self) -> GoalCategory {
        self.category
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn agent(&self) -> Option<AgentId> {
        let raw = self.agent.load(Ordering::Acquire);
        (raw != AgentId::NONE.0).then_some(AgentId(raw))
    }

    pub fn is_unassigned(&self) -> bool {
        self.agent().is_none()
    }

    /// Claim an unassigned goal. Fails if any agent (including `agent`) holds it.
    pub fn try_set_agent(&self, agent: AgentId) -> bool {
        if agent.is_none() {
            return false;
        }
        self.agent
            .compare_exchange(
                AgentId::NONE.0,
                agent.0,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Release the goal if `agent` holds it.
    pub fn release_agent(&self, agent: AgentId) -> bool {
        self.agent
            .compare_exchange(agent.0, AgentId::NONE.0, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn flags(&self) -> GoalFlags {
        GoalFlags(self.flags.load(Ordering::Acquire))
    }

    pub fn add_flags(&self, flags: GoalFlags) {
        self.flags.fetch_or(flags.bits(), Ordering::AcqRel);
    }

    pub fn is_streamlined(&self) -> bool {
        self.flags().contains(GoalFlags::STREAMLINED)
    }

    pub fn state(&self) -> GoalState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).0
    }

    /// Tick at which the goal last changed state.
    pub fn state_changed_at(&self) -> u64 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).1
    }

    pub fn change_state_to(&self, state: GoalState, tick: u64) {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.0 != state {
            *guard = (state, tick);
        }
    }

    /// Snapshot of the goal's projected world view.
    pub fn world_state(&self) -> WorldState {
        self.world
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Record a single fact in the goal's world view.
    pub fn with_world(&self, var: AiVar, value: impl Into<FactValue>) {
        self.merge_world(&WorldState::with(var, value));
    }

    /// Replace the goal's world view with `view ⊕ facts`.
    pub fn merge_world(&self, facts: &WorldState) {
        let mut guard = self.world.write().unwrap_or_else(PoisonError::into_inner);
        let next = guard.merge_with(facts);
        *guard = next;
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Goal[{} {:?} job={:016x} {}]",
            self.id.0, self.category, self.job.0, self.target
        )
    }
}
