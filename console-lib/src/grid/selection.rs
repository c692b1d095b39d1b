//! Key-based selection state.
//!
//! Selection is keyed by row key, never by position, so it survives
//! re-sorting, re-pagination and reloads.

use std::collections::HashSet;
use std::hash::Hash;

/// Tri-state of a "select all" checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckState {
    #[default]
    Unchecked,
    Indeterminate,
    Checked,
}

/// The set of row keys marked for action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Eq + Hash> {
    selected: HashSet<K>,
}

impl<K: Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash + Ord> Selection<K> {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected keys (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<K> {
        let mut keys: Vec<_> = self.selected.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Get the number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle a key. Returns `true` if it is selected afterwards.
    ///
    /// Eligibility is not consulted here; callers keep ineligible rows away.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.selected.remove(&key) {
            false
        } else {
            self.selected.insert(key);
            true
        }
    }

    /// Select every key in `keys`.
    /// Returns the keys that were newly selected.
    pub fn select_all(&mut self, keys: impl IntoIterator<Item = K>) -> Vec<K> {
        keys.into_iter()
            .filter(|key| self.selected.insert(key.clone()))
            .collect()
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<K> {
        self.selected.drain().collect()
    }

    /// Keep only keys present in `live`.
    /// Returns the keys that were dropped.
    pub fn retain_live(&mut self, live: &HashSet<K>) -> Vec<K> {
        let stale: Vec<K> = self
            .selected
            .iter()
            .filter(|key| !live.contains(*key))
            .cloned()
            .collect();
        for key in &stale {
            self.selected.remove(key);
        }
        stale
    }

    /// State of a "select all" checkbox covering `eligible`.
    ///
    /// `Checked` only when there is at least one eligible key and all of
    /// them are selected.
    pub fn check_state<'a>(&self, eligible: impl IntoIterator<Item = &'a K>) -> CheckState
    where
        K: 'a,
    {
        let mut total = 0;
        let mut hits = 0;
        for key in eligible {
            total += 1;
            if self.selected.contains(key) {
                hits += 1;
            }
        }
        match hits {
            0 => CheckState::Unchecked,
            n if n == total => CheckState::Checked,
            _ => CheckState::Indeterminate,
        }
    }
}
