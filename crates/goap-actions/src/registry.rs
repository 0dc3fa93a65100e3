use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use goap_core::stable_hash;

use crate::{Action, ActionId, CapabilitySnapshot, RegistryError};

/// One shared instance per action id.
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<u64, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<A: Action + 'static>(&mut self, action: A) -> Result<ActionId, RegistryError> {
        self.register_arc(Arc::new(action))
    }

    pub fn register_arc(&mut self, action: Arc<dyn Action>) -> Result<ActionId, RegistryError> {
        let id = action.id();
        if self.actions.contains_key(&id.hash()) {
            return Err(RegistryError::Duplicate(id));
        }
        self.actions.insert(id.hash(), action);
        Ok(id)
    }

    pub fn get(&self, id: ActionId) -> Option<&Arc<dyn Action>> {
        self.actions.get(&id.hash())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Arc<dyn Action>> {
        self.actions.get(&stable_hash(name))
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.actions.contains_key(&id.hash())
    }

    /// Actions in stable id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Action>> + '_ {
        self.actions.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions.values().map(|a| a.id())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions `capabilities` may attempt at all.
    pub fn available_for<'a>(
        &'a self,
        capabilities: &'a CapabilitySnapshot,
    ) -> impl Iterator<Item = &'a Arc<dyn Action>> + 'a {
        self.actions
            .values()
            .filter(move |a| a.descriptor().is_available_for(capabilities))
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.actions.values().map(|a| a.id()))
            .finish()
    }
}

static GLOBAL: OnceLock<ActionRegistry> = OnceLock::new();

/// Install the process-wide registry. Only the first call succeeds.
pub fn install(registry: ActionRegistry) -> Result<&'static ActionRegistry, RegistryError> {
    let count = registry.len();
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    tracing::info!(actions = count, "installed global action registry");
    global()
}

pub fn global() -> Result<&'static ActionRegistry, RegistryError> {
    GLOBAL.get().ok_or(RegistryError::NotInstalled)
}
