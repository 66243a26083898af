//! A bidirectional one-to-one map.
//!
//! Both directions are kept consistent by routing every mutation through
//! `insert`/`remove_*`; neither side can be edited on its own.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct BiMap<L, R> {
    forward: HashMap<L, R>,
    inverse: HashMap<R, L>,
}

impl<L, R> BiMap<L, R>
where
    L: Copy + Eq + Hash,
    R: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            inverse: HashMap::new(),
        }
    }

    /// Pair `left` with `right`, dropping any pair either side was in.
    pub fn insert(&mut self, left: L, right: R) {
        self.remove_by_left(&left);
        self.remove_by_right(&right);
        self.forward.insert(left, right);
        self.inverse.insert(right, left);
    }

    pub fn get_by_left(&self, left: &L) -> Option<&R> {
        self.forward.get(left)
    }

    pub fn get_by_right(&self, right: &R) -> Option<&L> {
        self.inverse.get(right)
    }

    pub fn contains_left(&self, left: &L) -> bool {
        self.forward.contains_key(left)
    }

    pub fn contains_right(&self, right: &R) -> bool {
        self.inverse.contains_key(right)
    }

    pub fn remove_by_left(&mut self, left: &L) -> Option<R> {
        let right = self.forward.remove(left)?;
        self.inverse.remove(&right);
        Some(right)
    }

    pub fn remove_by_right(&mut self, right: &R) -> Option<L> {
        let left = self.inverse.remove(right)?;
        self.forward.remove(&left);
        Some(left)
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.inverse.clear();
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> {
        self.forward.iter()
    }
}

impl<L, R> Default for BiMap<L, R>
where
    L: Copy + Eq + Hash,
    R: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
