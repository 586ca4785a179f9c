use crate::config::Config;
use crate::runtime::SharedRuntime;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn default_duration_ms(&self) -> u32 {
        match self {
            Severity::Success => Config::SUCCESS_DURATION_MS,
            Severity::Error => Config::ERROR_DURATION_MS,
            Severity::Warning => Config::WARNING_DURATION_MS,
            Severity::Info => Config::INFO_DURATION_MS,
        }
    }

    /// Bootstrap alert modifier.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u32,
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct SinkState {
    next_id: u64,
    visible: Vec<Notification>,
    next_listener: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Transient alerts. Each notification expires on its own timer; there is
/// no queueing and no de-duplication.
#[derive(Clone)]
pub struct Notifier {
    runtime: SharedRuntime,
    state: Rc<RefCell<SinkState>>,
}

impl Notifier {
    pub fn new(runtime: SharedRuntime) -> Self {
        Self {
            runtime,
            state: Rc::default(),
        }
    }

    /// Shows `message` for `duration_ms` and returns its id.
    pub fn show(&self, message: impl Into<String>, severity: Severity, duration_ms: u32) -> u64 {
        let message = message.into();
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.visible.push(Notification {
                id,
                message,
                severity,
                duration_ms,
            });
            id
        };
        self.notify_listeners();

        let expiry = self.runtime.sleep(duration_ms);
        let state = Rc::downgrade(&self.state);
        self.runtime.spawn_local(Box::pin(async move {
            expiry.await;
            remove_and_notify(&state, id);
        }));

        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Success, Severity::Success.default_duration_ms())
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Error, Severity::Error.default_duration_ms())
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Warning, Severity::Warning.default_duration_ms())
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Info, Severity::Info.default_duration_ms())
    }

    /// Removes a notification before it expires. Returns false if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        remove_and_notify(&Rc::downgrade(&self.state), id)
    }

    /// Notifications currently on screen, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        self.state.borrow().visible.clone()
    }

    /// Registers `listener` to run after every change. Dropping the
    /// subscription unregisters it.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_listener;
        state.next_listener += 1;
        state.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    fn notify_listeners(&self) {
        notify(&self.state);
    }
}

fn notify(state: &Rc<RefCell<SinkState>>) {
    let listeners: Vec<Listener> = state
        .borrow()
        .listeners
        .iter()
        .map(|(_, listener)| listener.clone())
        .collect();
    for listener in listeners {
        listener();
    }
}

fn remove_and_notify(state: &Weak<RefCell<SinkState>>, id: u64) -> bool {
    let Some(state) = state.upgrade() else {
        return false;
    };
    let removed = {
        let mut inner = state.borrow_mut();
        let before = inner.visible.len();
        inner.visible.retain(|n| n.id != id);
        inner.visible.len() != before
    };
    if removed {
        notify(&state);
    }
    removed
}

/// Keeps a listener registered until dropped.
pub struct Subscription {
    id: u64,
    state: Weak<RefCell<SinkState>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let removed = {
                let mut inner = state.borrow_mut();
                inner
                    .listeners
                    .iter()
                    .position(|(id, _)| *id == self.id)
                    .map(|index| inner.listeners.remove(index))
            };
            drop(removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ManualRuntime;
    use std::cell::Cell;

    fn notifier() -> (Rc<ManualRuntime>, Notifier) {
        let runtime = Rc::new(ManualRuntime::new());
        let notifier = Notifier::new(runtime.clone());
        (runtime, notifier)
    }

    #[test]
    fn test_notifications_expire_independently() {
        let (runtime, notifier) = notifier();
        notifier.show("first", Severity::Info, 1_000);
        let second = notifier.show("second", Severity::Info, 5_000);

        runtime.advance(1_100);
        let visible = notifier.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, second);
        assert_eq!(visible[0].message, "second");

        runtime.advance(4_000);
        assert!(notifier.visible().is_empty());
    }

    #[test]
    fn test_default_durations() {
        let (runtime, notifier) = notifier();
        notifier.success("saved");
        notifier.info("restarting");
        notifier.warning("careful");
        notifier.error("failed");

        let durations: Vec<_> = notifier.visible().iter().map(|n| n.duration_ms).collect();
        assert_eq!(durations, vec![3_000, 4_000, 5_000, 7_000]);

        runtime.advance(3_000);
        assert_eq!(notifier.visible().len(), 3);
        runtime.advance(4_000);
        assert!(notifier.visible().is_empty());
    }

    #[test]
    fn test_manual_dismiss() {
        let (runtime, notifier) = notifier();
        let id = notifier.error("boom");

        assert!(notifier.dismiss(id));
        assert!(notifier.visible().is_empty());
        assert!(!notifier.dismiss(id));

        // The expiry timer firing later is harmless
        runtime.advance(10_000);
        assert!(notifier.visible().is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let (_runtime, notifier) = notifier();
        notifier.warning("same");
        notifier.warning("same");
        assert_eq!(notifier.visible().len(), 2);
    }

    #[test]
    fn test_subscribers_see_changes_until_dropped() {
        let (runtime, notifier) = notifier();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let subscription = notifier.subscribe(move || counter.set(counter.get() + 1));

        notifier.show("hello", Severity::Success, 100);
        assert_eq!(calls.get(), 1);
        runtime.advance(100);
        assert_eq!(calls.get(), 2);

        drop(subscription);
        notifier.info("unseen");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_severity_css_classes() {
        assert_eq!(Severity::Error.css_class(), "danger");
        assert_eq!(Severity::Success.css_class(), "success");
    }
}
