// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stateful accumulation operator.

use parking_lot::Mutex;
use rivulet_core::{Event, Signal, Source};
use std::sync::Arc;

/// Extension trait providing the `reduce` operator.
pub trait ReduceExt<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// The stream type produced by this operator.
    type Output<T: Clone + Send + Sync + 'static>;

    /// Scans the stream with a running accumulator, one per subscription:
    /// each incoming `Next` combines into the accumulator, whose updated
    /// value is re-emitted as `Next`. Terminal events pass through.
    ///
    /// On a `Source`, every run starts from a fresh copy of `initial`.
    fn reduce<T, F>(&self, initial: T, combine: F) -> Self::Output<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T, V) -> T + Send + Sync + 'static;
}

impl<V, E> ReduceExt<V, E> for Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<T: Clone + Send + Sync + 'static> = Signal<T, E>;

    fn reduce<T, F>(&self, initial: T, combine: F) -> Signal<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T, V) -> T + Send + Sync + 'static,
    {
        Signal::new(|observer| {
            let accumulator = Arc::new(Mutex::new(initial));
            self.on(move |event| match event {
                Event::Next(value) => {
                    let updated = {
                        let mut accumulator = accumulator.lock();
                        let updated = combine(accumulator.clone(), value);
                        *accumulator = updated.clone();
                        updated
                    };
                    observer.send_next(updated);
                }
                Event::Failed(error) => observer.send_failed(error),
                Event::Completed => observer.send_completed(),
                Event::Interrupted => observer.send_interrupted(),
            })
        })
    }
}

impl<V, E> ReduceExt<V, E> for Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<T: Clone + Send + Sync + 'static> = Source<T, E>;

    fn reduce<T, F>(&self, initial: T, combine: F) -> Source<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T, V) -> T + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        self.lift(move |signal| {
            let combine = Arc::clone(&combine);
            signal.reduce(initial.clone(), move |accumulator, value| {
                combine(accumulator, value)
            })
        })
    }
}
