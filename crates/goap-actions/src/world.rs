//! Host-world collaborators an action talks to while executing.
//!
//! Actions only ever see `&mut dyn ActionWorld`; the host implements the
//! narrow traits below and gets [`ActionWorld`] for free.

use core::ops::BitOr;

use goap_core::{stable_hash, AgentId, Pos};
use goap_goals::GoalBoard;
use serde::{Deserialize, Serialize};

use crate::FxHandle;

/// Path request flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PathFlags(u8);

impl PathFlags {
    pub const NONE: PathFlags = PathFlags(0);
    /// Any tile adjacent to the destination is acceptable.
    pub const ADJ_NEARBY: PathFlags = PathFlags(1 << 0);
    /// Standing on the destination itself is acceptable.
    pub const ADJ_ON_TOP: PathFlags = PathFlags(1 << 1);
    /// The agent will not stay; don't reserve the destination.
    pub const TEMP_DESTINATION: PathFlags = PathFlags(1 << 2);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: PathFlags) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for PathFlags {
    type Output = PathFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        PathFlags(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u64);

impl MaterialId {
    pub const fn named(name: &str) -> Self {
        Self(stable_hash(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialStack {
    pub material: MaterialId,
    pub amount: u32,
}

impl MaterialStack {
    pub fn new(material: MaterialId, amount: u32) -> Self {
        Self { material, amount }
    }
}

pub trait Navigation {
    fn position_of(&self, agent: AgentId) -> Pos;

    /// The agent is mid-manoeuvre (e.g. stepping aside) and cannot act.
    fn is_busy(&self, agent: AgentId) -> bool;

    fn is_grounded(&self, agent: AgentId) -> bool;

    /// Issue a path request. Returns false when no path could be requested.
    fn try_go_to(&mut self, agent: AgentId, to: Pos, flags: PathFlags) -> bool;

    fn try_step_aside(&mut self, agent: AgentId) -> bool;

    /// Remember that `pos` is unreachable for `agent`, optionally for a bounded
    /// number of ticks.
    fn store_nav_failure(&mut self, agent: AgentId, pos: Pos, cooldown_ticks: Option<u64>);

    fn find_safe_spot_near(&self, agent: AgentId, pos: Pos) -> Option<Pos>;

    fn set_forced_walk(&mut self, agent: AgentId);
}

pub trait Inventory {
    fn has_enough(&self, material: MaterialId, amount: u32) -> bool;

    fn notify_deficit(&mut self, material: MaterialId, amount: u32);
}

/// Cosmetic side effects. Every method defaults to a no-op so headless hosts
/// and tests can ignore presentation entirely.
pub trait Presentation {
    fn spawn_fx(&mut self, _agent: AgentId, _at: Pos, _kind: &'static str) -> Option<FxHandle> {
        None
    }

    fn release_fx(&mut self, _fx: FxHandle) {}

    fn face(&mut self, _agent: AgentId, _towards: Pos) {}

    fn play_sound(&mut self, _agent: AgentId, _sound: &'static str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkTargetKind {
    Constructable { floor: bool },
    Plant,
}

/// Workable objects on the map.
pub trait Worksites {
    /// What sits at `pos`, if it is still active.
    fn work_target(&self, pos: Pos) -> Option<WorkTargetKind>;

    fn is_immutable(&self, pos: Pos) -> bool;

    /// Some object or wall stands on the floor tile at `pos`.
    fn is_floor_occupied(&self, pos: Pos) -> bool;

    fn is_walkable(&self, pos: Pos) -> bool;

    /// Add deconstruction work. Returns true once the target is fully taken apart.
    fn add_deconstruction(&mut self, pos: Pos, work: f32) -> bool;

    fn break_down(&mut self, pos: Pos);

    /// Harvest the plant at `pos`. `None` when it has no output.
    fn harvest(&mut self, pos: Pos) -> Option<Vec<MaterialStack>>;

    /// Where harvested materials are dropped. Defaults to the plant itself.
    fn harvest_output_pos(&self, pos: Pos) -> Pos {
        pos
    }

    fn spawn_material(&mut self, stack: MaterialStack, at: Pos);
}

/// Everything an action may touch while executing.
pub trait ActionWorld: Navigation + Inventory + Presentation + Worksites + GoalBoard {
    fn goal_board(&self) -> &dyn GoalBoard;
}

impl<T> ActionWorld for T
where
    T: Navigation + Inventory + Presentation + Worksites + GoalBoard,
{
    fn goal_board(&self) -> &dyn GoalBoard {
        self
    }
}
