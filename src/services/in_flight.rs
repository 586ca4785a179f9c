use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Tracks which long-running operations currently have a request outstanding.
///
/// At most one guard exists per operation name; the entry is released when
/// the guard drops, whatever the outcome of the request was.
#[derive(Clone, Default)]
pub struct InFlightRegistry {
    active: Rc<RefCell<HashSet<String>>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `operation`, or returns `None` if it is already running.
    pub fn try_acquire(&self, operation: &str) -> Option<InFlightGuard> {
        let inserted = self.active.borrow_mut().insert(operation.to_string());
        inserted.then(|| InFlightGuard {
            operation: operation.to_string(),
            active: self.active.clone(),
        })
    }

    pub fn is_running(&self, operation: &str) -> bool {
        self.active.borrow().contains(operation)
    }
}

#[must_use = "the operation is released as soon as the guard is dropped"]
pub struct InFlightGuard {
    operation: String,
    active: Rc<RefCell<HashSet<String>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.borrow_mut().remove(&self.operation);
    }
}
