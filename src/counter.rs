use std::cell::Cell;

/// A non-atomic counter of the handles sharing one resource.
///
/// Each [SharedHandle](crate::SharedHandle) allocates its own counter and
/// shares it with its clones through a pointer. There is no `Clone` impl on
/// purpose: a duplicated counter would let two groups of handles each believe
/// they are the last owner.
///
/// ```
/// # use shared_handle::*;
/// let counter = ReferenceCounter::new();
/// counter.increment();
/// counter.increment();
/// assert_eq!(counter.decrement(), 1);
/// assert_eq!(counter.value(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ReferenceCounter {
    count: Cell<usize>,
}

impl ReferenceCounter {
    pub fn new() -> Self {
        Self {
            count: Cell::new(0),
        }
    }

    /// # Panics
    ///
    /// Panics if the count would overflow, leaving it unchanged.
    pub fn increment(&self) {
        let Some(count) = self.count.get().checked_add(1) else {
            panic!("reference counter overflowed");
        };
        self.count.set(count);
    }

    /// Decrements and returns the new count.
    ///
    /// The count must be positive. Decrementing a zero counter is a contract
    /// violation, only caught in debug builds.
    pub fn decrement(&self) -> usize {
        let count = self.count.get();
        debug_assert!(count > 0, "reference counter decremented below zero");
        let count = count.wrapping_sub(1);
        self.count.set(count);
        count
    }

    pub fn value(&self) -> usize {
        self.count.get()
    }

    /// Forces the count back to zero, skipping the decrement protocol.
    ///
    /// Handles never hand out their counter, so this only reaches counters
    /// built with [ReferenceCounter::new]. Anything that still relies on the
    /// old count is wrong after this call.
    pub fn force_reset(&self) {
        self.count.set(0);
    }
}
