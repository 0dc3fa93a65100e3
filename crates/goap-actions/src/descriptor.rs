use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::OnceLock;

use goap_core::{stable_hash, WorldState};
use goap_goals::JobTypeId;

use crate::{AbilityId, AbilityRequirements, CapabilitySnapshot, NeedId, StatFlags};

/// Stable action identity. Compared and hashed by the integer hash only.
#[derive(Debug, Clone, Copy)]
pub struct ActionId {
    name: &'static str,
    hash: u64,
}

impl ActionId {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            hash: stable_hash(name),
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.name
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for ActionId {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for ActionId {}

impl Hash for ActionId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl PartialOrd for ActionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ActionId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hash.cmp(&other.hash)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Immutable description of one action type.
///
/// Built once with the `with_*` methods, then shared by every agent. The only
/// interior state is the memoized display name.
#[derive(Debug)]
pub struct ActionDescriptor {
    id: ActionId,
    name: OnceLock<String>,
    name_fn: Option<fn() -> String>,
    preconditions: WorldState,
    outcomes: WorldState,
    abilities: AbilityRequirements,
    required_need: Option<NeedId>,
    job_type: Option<JobTypeId>,
    does_not_require_abilities: bool,
    quiet: bool,
    flags_required: StatFlags,
    flags_forbidden: StatFlags,
}

impl ActionDescriptor {
    pub fn new(id: ActionId) -> Self {
        Self {
            id,
            name: OnceLock::new(),
            name_fn: None,
            preconditions: WorldState::empty(),
            outcomes: WorldState::empty(),
            abilities: AbilityRequirements::none(),
            required_need: None,
            job_type: None,
            does_not_require_abilities: false,
            quiet: false,
            flags_required: StatFlags::NONE,
            flags_forbidden: StatFlags::NONE,
        }
    }

    /// Lazily resolved display name. Defaults to `act.<id>`.
    pub fn with_name(mut self, name_fn: fn() -> String) -> Self {
        self.name_fn = Some(name_fn);
        self
    }

    pub fn with_preconditions(mut self, state: WorldState) -> Self {
        self.preconditions = state;
        self
    }

    pub fn with_outcomes(mut self, state: WorldState) -> Self {
        self.outcomes = state;
        self
    }

    pub fn with_required_abilities(mut self, abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities = AbilityRequirements::all_of(abilities);
        self
    }

    /// Another complete ability set that makes the action available on its own.
    pub fn with_alternative_abilities(
        mut self,
        abilities: impl IntoIterator<Item = AbilityId>,
    ) -> Self {
        self.abilities = self.abilities.or_group(abilities);
        self
    }

    /// Require one of `alternatives` in addition to every declared ability set.
    pub fn with_required_one_of(mut self, alternatives: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities = self.abilities.one_of(alternatives);
        self
    }

    pub fn with_ability_requirements(mut self, requirements: AbilityRequirements) -> Self {
        self.abilities = requirements;
        self
    }

    pub fn without_required_abilities(mut self) -> Self {
        self.does_not_require_abilities = true;
        self
    }

    pub fn with_required_job_type(mut self, job: JobTypeId) -> Self {
        self.job_type = Some(job);
        self
    }

    pub fn with_required_need(mut self, need: NeedId) -> Self {
        self.required_need = Some(need);
        self
    }

    pub fn with_required_flags(mut self, flags: StatFlags) -> Self {
        self.flags_required = flags;
        self
    }

    pub fn with_forbidden_flags(mut self, flags: StatFlags) -> Self {
        self.flags_forbidden = flags;
        self
    }

    /// Quiet actions are traced at debug level only.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.get_or_init(|| match self.name_fn {
            Some(f) => f(),
            None => format!("act.{}", self.id),
        })
    }

    pub fn preconditions(&self) -> &WorldState {
        &self.preconditions
    }

    pub fn outcomes(&self) -> &WorldState {
        &self.outcomes
    }

    pub fn abilities(&self) -> &AbilityRequirements {
        &self.abilities
    }

    pub fn job_type(&self) -> Option<JobTypeId> {
        self.job_type
    }

    pub fn required_need(&self) -> Option<NeedId> {
        self.required_need
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn does_not_require_abilities(&self) -> bool {
        self.does_not_require_abilities
    }

    /// Whether an agent with `capabilities` may ever attempt this action.
    ///
    /// Pure and cheap enough to run for every agent/action pair on every
    /// planning cycle. A descriptor that declares no abilities without opting
    /// out is a configuration defect: it is logged and treated as unavailable.
    pub fn is_available_for(&self, capabilities: &CapabilitySnapshot) -> bool {
        if let Some(job) = self.job_type {
            match capabilities.job(job) {
                Some(slot) if !slot.incapable => {}
                _ => return false,
            }
        }
        if let Some(need) = self.required_need {
            if !capabilities.has_need(need) {
                return false;
            }
        }
        let flags = capabilities.flags();
        if !self.flags_required.is_empty() && !flags.contains(self.flags_required) {
            return false;
        }
        if !self.flags_forbidden.is_empty() && flags.intersects(self.flags_forbidden) {
            return false;
        }
        if self.abilities.is_empty() {
            if !self.does_not_require_abilities {
                tracing::error!(
                    action = %self.id,
                    "action misconfigured: no required abilities and no opt-out, excluding it"
                );
                return false;
            }
            return true;
        }
        self.abilities.is_satisfied_by(capabilities)
    }

    /// Forward step: the state after this action, if it applies and is not a no-op.
    pub fn try_apply_to(&self, state: &WorldState) -> Option<WorldState> {
        if !self.preconditions.is_fulfilled_in(state) {
            return None;
        }
        if self.outcomes.is_fulfilled_in(state) {
            return None;
        }
        Some(state.merge_with(&self.outcomes))
    }

    /// Backward step: what must have held before this action produced `state`.
    pub fn try_unapply(&self, state: &WorldState) -> Option<WorldState> {
        if !self.outcomes.is_fulfilled_in(state) {
            tracing::debug!(action = %self.id, %state, "cannot unapply");
            return None;
        }
        let prev = state
            .subtract(&self.outcomes)
            .merge_with(&self.preconditions);
        tracing::debug!(action = %self.id, %state, %prev, "unapplied");
        Some(prev)
    }
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AIAct[{}]", self.id)
    }
}
