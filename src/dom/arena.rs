//! Named fragment bindings, backed by a slotmap arena.

use std::collections::HashMap;

use slotmap::SlotMap;

use super::node::{Fragment, FragmentId};

/// Fragments bound to template variable names.
///
/// All fragments live in one `SlotMap`; a name index maps variable names to
/// arena keys. Rebinding a name evicts the fragment previously bound to it.
#[derive(Debug, Default)]
pub struct FragmentArena {
    fragments: SlotMap<FragmentId, Fragment>,
    names: HashMap<String, FragmentId>,
}

impl FragmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `fragment` under `name`, returning the fragment it replaces.
    pub fn bind(&mut self, name: impl Into<String>, fragment: Fragment) -> Option<Fragment> {
        let key = self.fragments.insert(fragment);
        self.names
            .insert(name.into(), key)
            .and_then(|old| self.fragments.remove(old))
    }

    /// Unbind `name` and hand its fragment back to the caller.
    pub fn take(&mut self, name: &str) -> Option<Fragment> {
        let key = self.names.remove(name)?;
        self.fragments.remove(key)
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.names.get(name).and_then(|&key| self.fragments.get(key))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Fragment> {
        let key = *self.names.get(name)?;
        self.fragments.get_mut(key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Drop every binding.
    pub fn clear(&mut self) {
        self.names.clear();
        self.fragments.clear();
    }
}
