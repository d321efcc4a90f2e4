// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::disposable::{Disposable, DisposableHandle};
use parking_lot::Mutex;

#[derive(Default)]
struct SerialState {
    inner: Option<DisposableHandle>,
    disposed: bool,
}

/// A disposable holding a replaceable inner disposable.
///
/// Replacing the inner value disposes the previous one synchronously first.
/// Once the serial itself has been disposed, any inner value assigned
/// thereafter is disposed immediately on assignment — which is what lets a
/// producer's disposable be installed *after* the producer has run, without
/// leaking it when the producer terminated synchronously.
#[derive(Default)]
pub struct SerialDisposable {
    state: Mutex<SerialState>,
}

impl SerialDisposable {
    /// Creates a serial disposable with no inner value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a serial disposable wrapping `inner`.
    #[must_use]
    pub fn wrapping(inner: DisposableHandle) -> Self {
        Self {
            state: Mutex::new(SerialState {
                inner: Some(inner),
                disposed: false,
            }),
        }
    }

    /// The current inner disposable, if any.
    #[must_use]
    pub fn inner(&self) -> Option<DisposableHandle> {
        self.state.lock().inner.clone()
    }

    /// Installs a new inner disposable.
    ///
    /// The previous inner value (if any) is disposed first. If the serial
    /// itself is already disposed, the new value is disposed immediately.
    pub fn set_inner(&self, inner: Option<DisposableHandle>) {
        let (previous, already_disposed) = {
            let mut state = self.state.lock();
            let previous = state.inner.take();
            if state.disposed {
                (previous, inner)
            } else {
                state.inner = inner;
                (previous, None)
            }
        };
        // Run disposal outside the lock: inner disposables may re-enter.
        if let Some(previous) = previous {
            previous.dispose();
        }
        if let Some(orphan) = already_disposed {
            orphan.dispose();
        }
    }
}

impl Disposable for SerialDisposable {
    fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    fn dispose(&self) {
        let inner = {
            let mut state = self.state.lock();
            state.disposed = true;
            state.inner.take()
        };
        if let Some(inner) = inner {
            inner.dispose();
        }
    }
}

impl std::fmt::Debug for SerialDisposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
