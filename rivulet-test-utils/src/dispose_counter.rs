// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{ActionDisposable, DisposableHandle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts how many times disposal actions minted from it actually ran,
/// for asserting idempotency and teardown fan-out.
#[derive(Default)]
pub struct DisposeCounter {
    count: Arc<AtomicUsize>,
}

impl DisposeCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh disposable whose action increments this counter once.
    #[must_use]
    pub fn handle(&self) -> DisposableHandle {
        let count = Arc::clone(&self.count);
        Arc::new(ActionDisposable::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        }))
    }

    /// How many disposal actions have run so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
