//! An order shared between threads.

use super::machine::Order;
use super::state::{OrderOperation, OrderState};
use super::transition::Outcome;
use crate::checkpoint::Checkpoint;
use std::sync::{Arc, Mutex, MutexGuard};

/// Handle to an [`Order`] guarded by a single lock.
///
/// Each operation reads the current state and writes the next one while
/// holding the lock, so concurrent callers see the operations in some
/// serial order. Clones refer to the same order.
#[derive(Clone, Debug, Default)]
pub struct SharedOrder {
    inner: Arc<Mutex<Order>>,
}

impl SharedOrder {
    /// Wrap an order for shared access
    pub fn new(order: Order) -> Self {
        Self {
            inner: Arc::new(Mutex::new(order)),
        }
    }

    // An order is never left half-updated, so a poisoned lock still holds a
    // valid order.
    fn lock(&self) -> MutexGuard<'_, Order> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply an operation under the order's lock
    pub fn apply(&self, operation: OrderOperation) -> Outcome {
        self.lock().apply(operation)
    }

    /// Get current state
    pub fn state(&self) -> OrderState {
        self.lock().state()
    }

    /// Snapshot the order under its lock
    pub fn checkpoint(&self) -> Checkpoint<OrderState> {
        self.lock().checkpoint()
    }

    /// Run `f` with exclusive access to the order.
    pub fn with<R>(&self, f: impl FnOnce(&mut Order) -> R) -> R {
        f(&mut *self.lock())
    }
}

impl From<Order> for SharedOrder {
    fn from(order: Order) -> Self {
        Self::new(order)
    }
}
