// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value transformation operator.

use rivulet_core::{Signal, Source};
use std::sync::Arc;

/// Extension trait providing the `map` operator.
pub trait MapExt<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// The stream type produced by this operator.
    type Output<U: Clone + Send + Sync + 'static>;

    /// Transforms each `Next` value with `transform`; terminal events pass
    /// through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use rivulet_core::Signal;
    /// use rivulet_stream::MapExt;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let (signal, observer) = Signal::<i32, &str>::pipe();
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = seen.clone();
    /// signal.map(|x| x * 2).on_next(move |x| sink.lock().unwrap().push(x));
    ///
    /// observer.send_next(3);
    /// assert_eq!(*seen.lock().unwrap(), vec![6]);
    /// ```
    fn map<U, F>(&self, transform: F) -> Self::Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> U + Send + Sync + 'static;
}

impl<V, E> MapExt<V, E> for Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<U: Clone + Send + Sync + 'static> = Signal<U, E>;

    fn map<U, F>(&self, transform: F) -> Signal<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> U + Send + Sync + 'static,
    {
        Signal::new(|observer| self.on(move |event| observer.send(event.map(&transform))))
    }
}

impl<V, E> MapExt<V, E> for Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<U: Clone + Send + Sync + 'static> = Source<U, E>;

    fn map<U, F>(&self, transform: F) -> Source<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> U + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        self.lift(move |signal| {
            let transform = Arc::clone(&transform);
            signal.map(move |value| transform(value))
        })
    }
}
