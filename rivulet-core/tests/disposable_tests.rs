// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{
    ActionDisposable, Disposable, DisposableHandle, ScopedDisposable, SerialDisposable,
    SimpleDisposable,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting_handle(count: &Arc<AtomicUsize>) -> DisposableHandle {
    let count = Arc::clone(count);
    Arc::new(ActionDisposable::new(move || {
        count.fetch_add(1, Ordering::SeqCst);
    }))
}

#[test]
fn action_disposable_runs_once() {
    let count = Arc::new(AtomicUsize::new(0));
    let disposable = counting_handle(&count);

    assert!(!disposable.is_disposed());
    disposable.dispose();
    disposable.dispose();

    assert!(disposable.is_disposed());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn simple_disposable_only_flips_flag() {
    let disposable = SimpleDisposable::new();
    assert!(!disposable.is_disposed());
    disposable.dispose();
    disposable.dispose();
    assert!(disposable.is_disposed());
}

#[test]
fn scoped_disposable_disposes_on_drop() {
    let count = Arc::new(AtomicUsize::new(0));
    {
        let _guard = ScopedDisposable::new(counting_handle(&count));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn scoped_disposable_explicit_dispose_is_idempotent_with_drop() {
    let count = Arc::new(AtomicUsize::new(0));
    {
        let guard = ScopedDisposable::new(counting_handle(&count));
        guard.dispose();
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn serial_disposable_replacing_inner_disposes_previous_first() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let serial = SerialDisposable::new();

    serial.set_inner(Some(counting_handle(&first)));
    assert_eq!(first.load(Ordering::SeqCst), 0);

    serial.set_inner(Some(counting_handle(&second)));
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);

    serial.dispose();
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn serial_disposable_assignment_after_disposal_disposes_immediately() {
    let count = Arc::new(AtomicUsize::new(0));
    let serial = SerialDisposable::new();
    serial.dispose();

    serial.set_inner(Some(counting_handle(&count)));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(serial.inner().is_none());
}

#[test]
fn serial_disposable_dispose_is_idempotent() {
    let count = Arc::new(AtomicUsize::new(0));
    let serial = SerialDisposable::wrapping(counting_handle(&count));

    serial.dispose();
    serial.dispose();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(serial.is_disposed());
}
