//! Agent capabilities and the ability requirements actions declare against them.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{BitAnd, BitOr};

use goap_core::{stable_hash, TICKS_PER_HOUR};
use goap_goals::JobTypeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AbilityId(pub u64);

impl AbilityId {
    pub const fn named(name: &str) -> Self {
        Self(stable_hash(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NeedId(pub u64);

impl NeedId {
    pub const fn named(name: &str) -> Self {
        Self(stable_hash(name))
    }
}

/// Species-level stat flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct StatFlags(pub u32);

impl StatFlags {
    pub const NONE: StatFlags = StatFlags(0);
    pub const ORGANIC: StatFlags = StatFlags(1 << 0);
    pub const SYNTHETIC: StatFlags = StatFlags(1 << 1);
    pub const FLYING: StatFlags = StatFlags(1 << 2);
    pub const PET: StatFlags = StatFlags(1 << 3);
    pub const HOSTILE: StatFlags = StatFlags(1 << 4);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: StatFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn intersects(self, other: StatFlags) -> bool {
        (self.0 & other.0) != 0
    }
}

impl BitOr for StatFlags {
    type Output = StatFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        StatFlags(self.0 | rhs.0)
    }
}

impl BitAnd for StatFlags {
    type Output = StatFlags;

    fn bitand(self, rhs: Self) -> Self::Output {
        StatFlags(self.0 & rhs.0)
    }
}

/// An agent's standing in one job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobSlot {
    pub incapable: bool,
    /// Work contributed by one tick of effort.
    pub work_per_use: f32,
    /// Base cost of one action in this job before skill amortization.
    pub base_cost: f32,
    /// First tick the agent is free to work this job.
    #[serde(default)]
    pub available_from: u64,
}

impl JobSlot {
    pub fn new(work_per_use: f32, base_cost: f32) -> Self {
        Self {
            incapable: false,
            work_per_use,
            base_cost,
            available_from: 0,
        }
    }

    pub fn available_from(mut self, tick: u64) -> Self {
        self.available_from = tick;
        self
    }

    pub fn incapable(mut self) -> Self {
        self.incapable = true;
        self
    }

    /// One tick's worth of work.
    pub fn use_skill(&self) -> f32 {
        self.work_per_use
    }

    /// Skill-amortized cost at `tick`: a faster worker finishes the same action
    /// sooner. Each hour still to wait before the slot frees up adds one base cost.
    pub fn action_cost(&self, tick: u64) -> f32 {
        let amortized = self.base_cost / self.work_per_use.max(f32::EPSILON);
        let wait_hours = self.available_from.saturating_sub(tick) as f32 / TICKS_PER_HOUR as f32;
        amortized + wait_hours * self.base_cost
    }
}

/// Read-only view of what an agent can currently do.
///
/// Owned by the agent and refreshed by the host between ticks; actions only
/// consult it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySnapshot {
    abilities: BTreeSet<AbilityId>,
    jobs: BTreeMap<JobTypeId, JobSlot>,
    needs: BTreeSet<NeedId>,
    flags: StatFlags,
}

impl CapabilitySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ability(mut self, ability: AbilityId) -> Self {
        self.abilities.insert(ability);
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities.extend(abilities);
        self
    }

    pub fn with_job(mut self, job: JobTypeId, slot: JobSlot) -> Self {
        self.jobs.insert(job, slot);
        self
    }

    pub fn with_need(mut self, need: NeedId) -> Self {
        self.needs.insert(need);
        self
    }

    pub fn with_flags(mut self, flags: StatFlags) -> Self {
        self.flags = self.flags | flags;
        self
    }

    pub fn grant_ability(&mut self, ability: AbilityId) {
        self.abilities.insert(ability);
    }

    pub fn revoke_ability(&mut self, ability: AbilityId) -> bool {
        self.abilities.remove(&ability)
    }

    pub fn set_need(&mut self, need: NeedId, active: bool) {
        if active {
            self.needs.insert(need);
        } else {
            self.needs.remove(&need);
        }
    }

    pub fn has_ability(&self, ability: AbilityId) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn job(&self, job: JobTypeId) -> Option<&JobSlot> {
        self.jobs.get(&job)
    }

    pub fn has_need(&self, need: NeedId) -> bool {
        self.needs.contains(&need)
    }

    pub fn flags(&self) -> StatFlags {
        self.flags
    }
}

/// Ability requirements as an OR of AND-groups.
///
/// The requirement holds when every ability of at least one group is present.
/// An empty requirement (no groups, or only empty groups) means the action
/// declared no abilities at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityRequirements {
    groups: Vec<Vec<AbilityId>>,
}

impl AbilityRequirements {
    pub fn none() -> Self {
        Self::default()
    }

    /// A single group: all of `abilities`.
    pub fn all_of(abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        Self {
            groups: vec![abilities.into_iter().collect()],
        }
    }

    /// Add another complete group that is acceptable on its own.
    pub fn or_group(mut self, abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        self.groups.push(abilities.into_iter().collect());
        self
    }

    /// Require one of `alternatives` on top of every existing group.
    ///
    /// `{Move, Work}.one_of([Build, Destroy])` becomes
    /// `{Move, Work, Build} | {Move, Work, Destroy}`.
    pub fn one_of(self, alternatives: impl IntoIterator<Item = AbilityId>) -> Self {
        let alternatives: Vec<AbilityId> = alternatives.into_iter().collect();
        if alternatives.is_empty() {
            return self;
        }
        let bases = if self.groups.is_empty() {
            vec![Vec::new()]
        } else {
            self.groups
        };
        let groups = bases
            .iter()
            .flat_map(|base| {
                alternatives.iter().map(move |alt| {
                    let mut group = base.clone();
                    if !group.contains(alt) {
                        group.push(*alt);
                    }
                    group
                })
            })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[Vec<AbilityId>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    pub fn is_satisfied_by(&self, capabilities: &CapabilitySnapshot) -> bool {
        self.groups
            .iter()
            .filter(|group| !group.is_empty())
            .any(|group| group.iter().all(|a| capabilities.has_ability(*a)))
    }
}

/// Name → id resolution for abilities known to the host.
///
/// Actions consult it at construction time to decide which ability groups to
/// declare (e.g. only offer a "Destroy" alternative when that ability exists).
#[derive(Debug, Clone, Default)]
pub struct AbilityRegistry {
    names: BTreeMap<AbilityId, String>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str) -> Self {
        self.register(name);
        self
    }

    pub fn register(&mut self, name: &str) -> AbilityId {
        let id = AbilityId::named(name);
        self.names.entry(id).or_insert_with(|| name.to_string());
        id
    }

    pub fn resolve(&self, name: &str) -> Option<AbilityId> {
        let id = AbilityId::named(name);
        self.names.contains_key(&id).then_some(id)
    }

    pub fn name_of(&self, id: AbilityId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
