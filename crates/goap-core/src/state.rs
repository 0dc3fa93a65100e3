//! Symbolic world state.
//!
//! A [`WorldState`] is a sparse set of `(variable, value)` facts. A variable that
//! is absent is "don't care", not false: [`WorldState::is_fulfilled_in`] only
//! looks at the facts on its own side.
//!
//! States are values. Every operation returns a new state and leaves its
//! operands untouched, so a state can be shared between concurrent goal
//! evaluations without coordination.

use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::stable_hash;

/// World-state variable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AiVar(pub u64);

impl AiVar {
    pub const fn named(name: &str) -> Self {
        Self(stable_hash(name))
    }
}

/// Value of a fact: a boolean or a small enumeration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FactValue {
    Bool(bool),
    Enum(u8),
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        FactValue::Bool(value)
    }
}

impl From<u8> for FactValue {
    fn from(value: u8) -> Self {
        FactValue::Enum(value)
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Bool(b) => write!(f, "{b}"),
            FactValue::Enum(v) => write!(f, "#{v}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldState {
    facts: BTreeMap<AiVar, FactValue>,
}

impl WorldState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start a state with a single fact. Chain with [`WorldState::and`].
    pub fn with(var: AiVar, value: impl Into<FactValue>) -> Self {
        Self::empty().and(var, value)
    }

    pub fn and(mut self, var: AiVar, value: impl Into<FactValue>) -> Self {
        self.facts.insert(var, value.into());
        self
    }

    pub fn get(&self, var: AiVar) -> Option<FactValue> {
        self.facts.get(&var).copied()
    }

    pub fn contains(&self, var: AiVar) -> bool {
        self.facts.contains_key(&var)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AiVar, FactValue)> + '_ {
        self.facts.iter().map(|(k, v)| (*k, *v))
    }

    /// True iff every fact in `self` appears with an equal value in `other`.
    pub fn is_fulfilled_in(&self, other: &WorldState) -> bool {
        self.facts
            .iter()
            .all(|(var, value)| other.facts.get(var) == Some(value))
    }

    /// Number of facts in `self` that `other` does not satisfy.
    pub fn unmet_in(&self, other: &WorldState) -> usize {
        self.facts
            .iter()
            .filter(|(var, value)| other.facts.get(var) != Some(*value))
            .count()
    }

    /// `self` extended by `other`; `other` wins on key collisions.
    pub fn merge_with(&self, other: &WorldState) -> WorldState {
        let mut facts = self.facts.clone();
        facts.extend(other.facts.iter().map(|(k, v)| (*k, *v)));
        WorldState { facts }
    }

    /// `self` without any key present in `other`. Values are not compared.
    pub fn subtract(&self, other: &WorldState) -> WorldState {
        let facts = self
            .facts
            .iter()
            .filter(|(var, _)| !other.facts.contains_key(var))
            .map(|(k, v)| (*k, *v))
            .collect();
        WorldState { facts }
    }
}

impl FromIterator<(AiVar, FactValue)> for WorldState {
    fn from_iter<I: IntoIterator<Item = (AiVar, FactValue)>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (var, value)) in self.facts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:016x}={value}", var.0)?;
        }
        f.write_str("}")
    }
}
