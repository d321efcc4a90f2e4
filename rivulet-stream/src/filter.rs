// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Predicate filtering operator.

use rivulet_core::{Event, Signal, Source};
use std::sync::Arc;

/// Extension trait providing the `filter` operator.
pub trait FilterExt<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// The stream type produced by this operator.
    type Output;

    /// Preserves only the `Next` values passing `predicate`; terminal events
    /// pass through unconditionally.
    fn filter<P>(&self, predicate: P) -> Self::Output
    where
        P: Fn(&V) -> bool + Send + Sync + 'static;
}

impl<V, E> FilterExt<V, E> for Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = Signal<V, E>;

    fn filter<P>(&self, predicate: P) -> Signal<V, E>
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Signal::new(|observer| {
            self.on(move |event| match event {
                Event::Next(value) => {
                    if predicate(&value) {
                        observer.send_next(value);
                    }
                }
                other => observer.send(other),
            })
        })
    }
}

impl<V, E> FilterExt<V, E> for Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = Source<V, E>;

    fn filter<P>(&self, predicate: P) -> Source<V, E>
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        self.lift(move |signal| {
            let predicate = Arc::clone(&predicate);
            signal.filter(move |value| predicate(value))
        })
    }
}
