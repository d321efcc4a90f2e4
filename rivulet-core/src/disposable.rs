// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Idempotent resource-release handles.
//!
//! A [`Disposable`] represents something that can be released exactly once:
//! a registration in a stream, a file descriptor, a timer, a producer's
//! in-flight work. Calling [`Disposable::dispose`] more than once is always
//! safe and has no further effect.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something that can be disposed, usually associated with freeing resources
/// or cancelling work.
pub trait Disposable {
    /// Whether this disposable has been disposed already.
    fn is_disposed(&self) -> bool;

    /// Releases the underlying resource. Idempotent.
    fn dispose(&self);
}

/// Shared handle to a disposable.
///
/// Disposables are passed around and stored by several independent holders
/// (the stream, the producer, subscribers), so the crate deals in
/// reference-counted trait objects throughout.
pub type DisposableHandle = Arc<dyn Disposable + Send + Sync>;

/// A disposable that runs an action upon the first disposal.
pub struct ActionDisposable {
    action: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl ActionDisposable {
    /// Creates a disposable that will run `action` when first disposed.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            action: Mutex::new(Some(Box::new(action))),
        }
    }
}

impl Disposable for ActionDisposable {
    fn is_disposed(&self) -> bool {
        self.action.lock().is_none()
    }

    fn dispose(&self) {
        // Take the action out before running it so reentrant disposal
        // observes the disposable as already disposed.
        let action = self.action.lock().take();
        if let Some(action) = action {
            action();
        }
    }
}

impl std::fmt::Debug for ActionDisposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A disposable that only flips a flag upon disposal and performs no other
/// work.
#[derive(Debug, Default)]
pub struct SimpleDisposable {
    disposed: AtomicBool,
}

impl SimpleDisposable {
    /// Creates a disposable in the undisposed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Disposable for SimpleDisposable {
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }
}
