use super::{IntervalHandle, Runtime};
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

type TimerCallback = Box<dyn FnMut()>;

struct Timer {
    due_ms: u64,
    period_ms: Option<u64>,
    // Taken out while the callback runs so no borrow is held across it
    callback: Option<TimerCallback>,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<u64, Timer>,
}

impl Clock {
    fn schedule(&mut self, delay_ms: u64, period_ms: Option<u64>, callback: TimerCallback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                due_ms: self.now_ms + delay_ms,
                period_ms,
                callback: Some(callback),
            },
        );
        id
    }

    /// Earliest timer due at or before `until_ms`; ties fire in scheduling order.
    fn next_due(&self, until_ms: u64) -> Option<(u64, u64)> {
        self.timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(id, timer)| (timer.due_ms, **id))
            .map(|(id, timer)| (*id, timer.due_ms))
    }
}

/// Deterministic runtime with a virtual clock.
///
/// Spawned tasks only run inside [`ManualRuntime::run_until_idle`] or
/// [`ManualRuntime::advance`], and timers only fire when the clock is advanced
/// past their deadline. Used to drive the scheduler, the notification sink and
/// request timeouts without a browser.
pub struct ManualRuntime {
    clock: Rc<RefCell<Clock>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl ManualRuntime {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            clock: Rc::default(),
            pool: RefCell::new(pool),
            spawner,
        }
    }

    /// Milliseconds elapsed on the virtual clock.
    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Polls spawned tasks until none of them can make progress.
    pub fn run_until_idle(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Moves the clock forward by `ms`, firing every timer that falls due on
    /// the way in deadline order and letting tasks settle after each one.
    pub fn advance(&self, ms: u64) {
        self.run_until_idle();
        let target = self.now_ms() + ms;

        loop {
            let next = self.clock.borrow().next_due(target);
            let Some((id, due_ms)) = next else {
                break;
            };

            let fired = {
                let mut clock = self.clock.borrow_mut();
                clock.now_ms = due_ms;
                let periodic = clock.timers.get(&id).and_then(|timer| timer.period_ms);
                match periodic {
                    Some(period) => clock.timers.get_mut(&id).and_then(|timer| {
                        timer.due_ms += period;
                        timer.callback.take().map(|callback| (callback, true))
                    }),
                    None => clock
                        .timers
                        .remove(&id)
                        .and_then(|timer| timer.callback)
                        .map(|callback| (callback, false)),
                }
            };

            if let Some((mut callback, periodic)) = fired {
                callback();
                if periodic {
                    let mut clock = self.clock.borrow_mut();
                    // Absent when the interval was cancelled from inside its own callback
                    if let Some(timer) = clock.timers.get_mut(&id) {
                        timer.callback = Some(callback);
                    }
                }
            }

            self.run_until_idle();
        }

        self.clock.borrow_mut().now_ms = target;
        self.run_until_idle();
    }

    /// Number of repeating timers still scheduled.
    pub fn active_intervals(&self) -> usize {
        self.clock
            .borrow()
            .timers
            .values()
            .filter(|timer| timer.period_ms.is_some())
            .count()
    }

    /// Number of one-shot timers (sleeps) still waiting.
    pub fn pending_sleeps(&self) -> usize {
        self.clock
            .borrow()
            .timers
            .values()
            .filter(|timer| timer.period_ms.is_none())
            .count()
    }
}

impl Default for ManualRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime for ManualRuntime {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawner.spawn_local(task) {
            log::error!("Failed to spawn task: {e}");
        }
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        self.clock.borrow_mut().schedule(
            u64::from(ms),
            None,
            Box::new(move || {
                if let Some(tx) = tx.take() {
                    // The sleeper may have been dropped (e.g. a request won the race)
                    let _ = tx.send(());
                }
            }),
        );
        Box::pin(async move {
            let _ = rx.await;
        })
    }

    fn interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> IntervalHandle {
        let period = u64::from(period_ms.max(1));
        let id = self.clock.borrow_mut().schedule(period, Some(period), tick);
        let clock = Rc::downgrade(&self.clock);
        IntervalHandle::new(move || {
            if let Some(clock) = clock.upgrade() {
                let removed = clock.borrow_mut().timers.remove(&id);
                drop(removed);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_interval_fires_once_per_period() {
        let runtime = ManualRuntime::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let _handle = runtime.interval(100, Box::new(move || counter.set(counter.get() + 1)));

        runtime.advance(99);
        assert_eq!(count.get(), 0);
        runtime.advance(1);
        assert_eq!(count.get(), 1);
        runtime.advance(350);
        assert_eq!(count.get(), 4);
        assert_eq!(runtime.now_ms(), 450);
    }

    #[test]
    fn test_dropping_handle_cancels_interval() {
        let runtime = ManualRuntime::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let handle = runtime.interval(100, Box::new(move || counter.set(counter.get() + 1)));
        assert_eq!(runtime.active_intervals(), 1);

        drop(handle);
        runtime.advance(1_000);
        assert_eq!(count.get(), 0);
        assert_eq!(runtime.active_intervals(), 0);
    }

    #[test]
    fn test_sleep_resolves_at_deadline() {
        let runtime = ManualRuntime::new();
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();
        let sleep = runtime.sleep(500);
        runtime.spawn_local(Box::pin(async move {
            sleep.await;
            flag.set(true);
        }));

        runtime.advance(499);
        assert!(!done.get());
        runtime.advance(1);
        assert!(done.get());
        assert_eq!(runtime.pending_sleeps(), 0);
    }

    #[test]
    fn test_spawned_tasks_wait_for_run() {
        let runtime = ManualRuntime::new();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        runtime.spawn_local(Box::pin(async move { flag.set(true) }));

        assert!(!ran.get());
        runtime.run_until_idle();
        assert!(ran.get());
    }
}
