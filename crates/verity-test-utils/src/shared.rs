//! External state that assertions read at execution time.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A value shared between a test body and the closures it asserts on.
///
/// Clones read and write the same cell, so a test can change the value after
/// building an assertion and re-execute it against the new state.
pub struct SharedValue<T: Copy> {
    cell: Rc<Cell<T>>,
}

impl<T: Copy> SharedValue<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(Cell::new(value)),
        }
    }

    pub fn get(&self) -> T {
        self.cell.get()
    }

    pub fn set(&self, value: T) {
        self.cell.set(value);
    }

    /// Apply `f` to the current value and store the result
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        self.cell.set(f(self.cell.get()));
    }
}

impl<T: Copy> Clone for SharedValue<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for SharedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedValue").field(&self.get()).finish()
    }
}
