// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error transformation operator.

use rivulet_core::{Signal, Source};
use std::sync::Arc;

/// Extension trait providing the `map_error` operator.
pub trait MapErrorExt<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// The stream type produced by this operator.
    type Output<F2: Clone + Send + Sync + 'static>;

    /// Transforms the payload of a `Failed` event with `transform`; every
    /// other event passes through unchanged. This is the only operator that
    /// converts errors — everything else propagates `Failed` untouched.
    fn map_error<F2, G>(&self, transform: G) -> Self::Output<F2>
    where
        F2: Clone + Send + Sync + 'static,
        G: Fn(E) -> F2 + Send + Sync + 'static;
}

impl<V, E> MapErrorExt<V, E> for Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<F2: Clone + Send + Sync + 'static> = Signal<V, F2>;

    fn map_error<F2, G>(&self, transform: G) -> Signal<V, F2>
    where
        F2: Clone + Send + Sync + 'static,
        G: Fn(E) -> F2 + Send + Sync + 'static,
    {
        Signal::new(|observer| self.on(move |event| observer.send(event.map_error(&transform))))
    }
}

impl<V, E> MapErrorExt<V, E> for Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<F2: Clone + Send + Sync + 'static> = Source<V, F2>;

    fn map_error<F2, G>(&self, transform: G) -> Source<V, F2>
    where
        F2: Clone + Send + Sync + 'static,
        G: Fn(E) -> F2 + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        self.lift(move |signal| {
            let transform = Arc::clone(&transform);
            signal.map_error(move |error| transform(error))
        })
    }
}
