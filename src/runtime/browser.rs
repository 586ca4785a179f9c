use super::{IntervalHandle, Runtime};
use futures::future::LocalBoxFuture;
use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;

/// Runtime backed by the browser event loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(TimeoutFuture::new(ms))
    }

    fn interval(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> IntervalHandle {
        let interval = Interval::new(period_ms, move || tick());
        IntervalHandle::new(move || drop(interval))
    }
}
