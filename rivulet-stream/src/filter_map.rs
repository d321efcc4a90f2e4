// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Optional transformation operator.

use rivulet_core::{Signal, Source};
use std::sync::Arc;

/// Extension trait providing the `filter_map` operator.
pub trait FilterMapExt<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// The stream type produced by this operator.
    type Output<U: Clone + Send + Sync + 'static>;

    /// Transforms each `Next` value through an `Option`-returning
    /// `transform`, silently dropping values mapped to `None`; terminal
    /// events pass through unchanged.
    fn filter_map<U, F>(&self, transform: F) -> Self::Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> Option<U> + Send + Sync + 'static;
}

impl<V, E> FilterMapExt<V, E> for Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<U: Clone + Send + Sync + 'static> = Signal<U, E>;

    fn filter_map<U, F>(&self, transform: F) -> Signal<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> Option<U> + Send + Sync + 'static,
    {
        Signal::new(|observer| {
            self.on(move |event| {
                if let Some(mapped) = event.filter_map(&transform) {
                    observer.send(mapped);
                }
            })
        })
    }
}

impl<V, E> FilterMapExt<V, E> for Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<U: Clone + Send + Sync + 'static> = Source<U, E>;

    fn filter_map<U, F>(&self, transform: F) -> Source<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> Option<U> + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        self.lift(move |signal| {
            let transform = Arc::clone(&transform);
            signal.filter_map(move |value| transform(value))
        })
    }
}
