use crate::{DefaultScheduler, Runtime, RuntimeScheduler};
use futures_task::noop_waker_ref;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callback_runs_once_with_frame_time() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let _registration = {
        let seen = Rc::clone(&seen);
        clock.with_frame_nanos(move |time| seen.borrow_mut().push(time))
    };
    assert!(runtime.needs_frame());

    let handle = runtime.handle();
    handle.drain_frame_callbacks(16_000_000);
    handle.drain_frame_callbacks(32_000_000);

    assert_eq!(seen.borrow().as_slice(), &[16_000_000]);
    assert!(!runtime.needs_frame());
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        runtime.frame_clock().with_frame_nanos(move |_| fired.set(true))
    };
    drop(registration);

    runtime.handle().drain_frame_callbacks(0);
    assert!(!fired.get());
    assert!(!runtime.needs_frame());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    let count = Rc::new(Cell::new(0));
    let nested = Rc::new(RefCell::new(None));

    let _outer = {
        let count = Rc::clone(&count);
        let nested = Rc::clone(&nested);
        let clock = runtime.frame_clock();
        runtime.frame_clock().with_frame_nanos(move |_| {
            count.set(count.get() + 1);
            let count = Rc::clone(&count);
            *nested.borrow_mut() = Some(clock.with_frame_nanos(move |_| {
                count.set(count.get() + 10);
            }));
        })
    };

    handle.drain_frame_callbacks(1);
    assert_eq!(count.get(), 1);
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(2);
    assert_eq!(count.get(), 11);
}

#[test]
fn scheduler_is_asked_for_a_frame_on_registration() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());

    let _a = runtime.frame_clock().with_frame_nanos(|_| {});
    let _b = runtime.frame_clock().with_frame_millis(|_| {});

    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
}

#[test]
fn registration_after_runtime_drop_is_inactive() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    drop(runtime);

    let registration = clock.with_frame_nanos(|_| panic!("runtime is gone"));
    assert!(!registration.is_active());
    assert!(!clock.runtime_handle().is_alive());
}

#[test]
fn next_frame_future_resolves_after_drain() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut future = pin!(runtime.frame_clock().next_frame());
    let mut cx = Context::from_waker(noop_waker_ref());

    assert_eq!(future.as_mut().poll(&mut cx), Poll::Pending);
    runtime.handle().drain_frame_callbacks(42);
    assert_eq!(future.as_mut().poll(&mut cx), Poll::Ready(42));
}
