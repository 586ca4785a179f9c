use crate::models::error::AppError;
use crate::runtime::{IntervalHandle, SharedRuntime};
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

/// What to do when an interval boundary arrives while the previous tick of
/// the same feed is still awaiting its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Drop the boundary; the next one is tried as usual.
    #[default]
    SkipWhileInFlight,
    /// Invoke anyway, allowing several ticks of one feed to be in flight.
    Concurrent,
}

type TickFn = Box<dyn Fn() -> LocalBoxFuture<'static, Result<(), AppError>>>;

struct TickRunner {
    name: String,
    tick: TickFn,
    runtime: SharedRuntime,
    policy: OverlapPolicy,
    in_flight: Cell<u32>,
}

impl TickRunner {
    fn fire(self: &Rc<Self>) {
        if self.policy == OverlapPolicy::SkipWhileInFlight && self.in_flight.get() > 0 {
            log::debug!("Skipping tick for {}: previous tick still running", self.name);
            return;
        }

        self.in_flight.set(self.in_flight.get() + 1);
        let pending = (self.tick)();
        let runner = Rc::clone(self);
        self.runtime.spawn_local(Box::pin(async move {
            if let Err(e) = pending.await {
                log::warn!("Polling error for {}: {e}", runner.name);
            }
            runner.in_flight.set(runner.in_flight.get() - 1);
        }));
    }
}

struct Feed {
    interval_ms: u32,
    _timer: IntervalHandle,
}

/// Table of named recurring tasks driving the live views.
///
/// A name maps to at most one running feed. Starting a name that is already
/// running cancels the old timer before the new one is installed.
#[derive(Clone)]
pub struct PollingScheduler {
    runtime: SharedRuntime,
    feeds: Rc<RefCell<HashMap<String, Feed>>>,
    policy: OverlapPolicy,
}

impl PollingScheduler {
    pub fn new(runtime: SharedRuntime) -> Self {
        Self::with_policy(runtime, OverlapPolicy::default())
    }

    pub fn with_policy(runtime: SharedRuntime, policy: OverlapPolicy) -> Self {
        Self {
            runtime,
            feeds: Rc::default(),
            policy,
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Runs `tick` now and then every `interval_ms` under `name`, replacing
    /// any feed already registered with that name. Tick failures are logged
    /// and never stop the feed.
    pub fn start_polling<F, Fut>(&self, name: impl Into<String>, interval_ms: u32, tick: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), AppError>> + 'static,
    {
        let name = name.into();
        if self.stop_polling(&name) {
            log::debug!("Replacing feed {name}");
        }

        let runner = Rc::new(TickRunner {
            name: name.clone(),
            tick: Box::new(move || -> LocalBoxFuture<'static, Result<(), AppError>> {
                Box::pin(tick())
            }),
            runtime: self.runtime.clone(),
            policy: self.policy,
            in_flight: Cell::new(0),
        });

        runner.fire();

        let timer = {
            let runner = runner.clone();
            self.runtime
                .interval(interval_ms, Box::new(move || runner.fire()))
        };

        log::info!("Started feed {name} every {interval_ms}ms");
        let replaced = self.feeds.borrow_mut().insert(
            name,
            Feed {
                interval_ms,
                _timer: timer,
            },
        );
        // Only possible if the first tick restarted this feed synchronously
        drop(replaced);
    }

    /// Cancels the feed registered under `name`. Returns false if there was none.
    pub fn stop_polling(&self, name: &str) -> bool {
        let feed = self.feeds.borrow_mut().remove(name);
        match feed {
            Some(feed) => {
                drop(feed);
                log::debug!("Stopped feed {name}");
                true
            }
            None => false,
        }
    }

    /// Cancels every feed. Called when the page is torn down.
    pub fn stop_all_polling(&self) {
        let feeds: Vec<Feed> = self.feeds.borrow_mut().drain().map(|(_, feed)| feed).collect();
        if !feeds.is_empty() {
            log::info!("Stopping {} feed(s)", feeds.len());
        }
        drop(feeds);
    }

    pub fn is_polling(&self, name: &str) -> bool {
        self.feeds.borrow().contains_key(name)
    }

    pub fn interval_of(&self, name: &str) -> Option<u32> {
        self.feeds.borrow().get(name).map(|feed| feed.interval_ms)
    }

    /// Names of the running feeds, sorted.
    pub fn active_feeds(&self) -> Vec<String> {
        let mut names: Vec<String> = self.feeds.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.feeds, &other.feeds)
    }
}
