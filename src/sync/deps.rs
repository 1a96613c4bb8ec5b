//! Dependency tracking for synchronization effects.
//!
//! An effect re-runs when any of its inputs differs *by reference* from the inputs it last
//! ran with. [`RefEq`] defines that comparison; [`DepTracker`] remembers the last inputs.

use crate::widget::WidgetInstance;
use std::rc::Rc;

/// Identity comparison for effect inputs.
pub trait RefEq {
    /// Whether `self` and `other` are the same input.
    fn ref_eq(&self, other: &Self) -> bool;
}

impl<T: ?Sized> RefEq for Rc<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl RefEq for WidgetInstance {
    fn ref_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: RefEq> RefEq for Option<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.ref_eq(b),
            _ => false,
        }
    }
}

impl<A: RefEq, B: RefEq> RefEq for (A, B) {
    fn ref_eq(&self, other: &Self) -> bool {
        self.0.ref_eq(&other.0) && self.1.ref_eq(&other.1)
    }
}

impl<A: RefEq, B: RefEq, C: RefEq> RefEq for (A, B, C) {
    fn ref_eq(&self, other: &Self) -> bool {
        self.0.ref_eq(&other.0) && self.1.ref_eq(&other.1) && self.2.ref_eq(&other.2)
    }
}

/// Last inputs an effect ran with.
///
/// A fresh tracker reports every input as changed, so effects run once at setup.
#[derive(Debug)]
pub struct DepTracker<T> {
    last: Option<T>,
}

impl<T> Default for DepTracker<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: RefEq> DepTracker<T> {
    /// Record `next`; returns `true` if the effect should run.
    pub fn update(&mut self, next: T) -> bool {
        let changed = match &self.last {
            Some(last) => !last.ref_eq(&next),
            None => true,
        };
        if changed {
            self.last = Some(next);
        }
        changed
    }

    /// Forget the last inputs so the next `update` runs the effect.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
