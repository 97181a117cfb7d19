//! Shared test utilities for chain resolution tests

use std::cell::Cell;
use std::rc::Rc;

/// Shared call counter that can be moved into a factory closure
#[derive(Clone, Default)]
pub struct Counter(Rc<Cell<usize>>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}
