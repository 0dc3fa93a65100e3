#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serializable plan data: the ordered steps to execute and their total cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanSpec<S> {
    pub steps: Vec<S>,
    pub cost: f32,
}

impl<S> PlanSpec<S> {
    pub fn new(steps: Vec<S>, cost: f32) -> Self {
        Self { steps, cost }
    }

    /// Nothing to do: the goal already holds.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Option<&S> {
        self.steps.first()
    }
}
