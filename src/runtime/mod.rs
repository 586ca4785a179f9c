//! Timer and task primitives the services run on.
//!
//! The browser build uses [`BrowserRuntime`] (`spawn_local` + `gloo-timers`);
//! headless code and tests use [`ManualRuntime`], whose clock only moves when
//! told to.

mod browser;
mod manual;

pub use browser::BrowserRuntime;
pub use manual::ManualRuntime;

use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// Single-threaded executor seam: everything runs on one event loop.
pub trait Runtime {
    /// Runs `task` to completion in the background.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolves once `ms` milliseconds have elapsed.
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;

    /// Calls `tick` every `period_ms` until the returned handle is cancelled or dropped.
    /// The first call happens one full period after scheduling.
    fn interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> IntervalHandle;
}

pub type SharedRuntime = Rc<dyn Runtime>;

/// Cancellation handle for a repeating timer. Dropping it stops the timer.
pub struct IntervalHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl IntervalHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for IntervalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalHandle")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}
