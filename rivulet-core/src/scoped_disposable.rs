// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::disposable::{Disposable, DisposableHandle};

/// A disposable that disposes its inner disposable when dropped.
///
/// Wrapping a stream's cancel disposable in a `ScopedDisposable` guarantees
/// cancellation on every exit path of the enclosing scope, without an
/// explicit `dispose` call.
///
/// # Examples
///
/// ```
/// use rivulet_core::{Disposable, ScopedDisposable, Signal};
///
/// let (signal, observer) = Signal::<i32, &str>::pipe();
/// {
///     let _guard = ScopedDisposable::new(signal.cancel_disposable());
///     observer.send_next(1);
/// } // the signal is interrupted here
/// assert!(signal.cancel_disposable().is_disposed());
/// ```
pub struct ScopedDisposable {
    inner: DisposableHandle,
}

impl ScopedDisposable {
    /// Wraps `inner` so it is disposed when the wrapper goes out of scope.
    #[must_use]
    pub fn new(inner: DisposableHandle) -> Self {
        Self { inner }
    }

    /// The wrapped disposable.
    #[must_use]
    pub fn inner(&self) -> &DisposableHandle {
        &self.inner
    }
}

impl Disposable for ScopedDisposable {
    fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    fn dispose(&self) {
        self.inner.dispose();
    }
}

impl Drop for ScopedDisposable {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}

impl std::fmt::Debug for ScopedDisposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
