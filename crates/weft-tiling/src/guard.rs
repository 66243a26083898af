//! Re-entrancy guard held while the driver reconciles.
//!
//! Reconciliation writes tile geometry on the host, which makes the host
//! report tile changes. Host callbacks hold a clone of the guard and drop
//! notifications that arrive while it is held.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct LayoutGuard(Rc<Cell<bool>>);

impl LayoutGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.0.get()
    }

    /// Hold the guard until the returned token is dropped. Returns `None`
    /// if it is already held.
    pub(crate) fn hold(&self) -> Option<GuardToken> {
        if self.0.replace(true) {
            return None;
        }
        Some(GuardToken(self.0.clone()))
    }
}

/// Releases the guard on drop.
#[derive(Debug)]
pub(crate) struct GuardToken(Rc<Cell<bool>>);

impl Drop for GuardToken {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
