// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream splitting operator.

use rivulet_core::{Event, Signal, Source};

/// Extension trait providing the `partition` operator.
pub trait PartitionExt<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// The stream type produced by this operator.
    type Output;

    /// Splits the stream into (matching, non-matching) halves.
    ///
    /// Each `Next` value goes to exactly one side depending on `predicate`;
    /// every terminal event is delivered to **both** sides.
    fn partition<P>(&self, predicate: P) -> (Self::Output, Self::Output)
    where
        P: Fn(&V) -> bool + Send + Sync + 'static;
}

impl<V, E> PartitionExt<V, E> for Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = Signal<V, E>;

    fn partition<P>(&self, predicate: P) -> (Signal<V, E>, Signal<V, E>)
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        let (matching, matching_observer) = Signal::pipe();
        let (rest, rest_observer) = Signal::pipe();
        let _ = self.on(move |event| match event {
            Event::Next(value) => {
                if predicate(&value) {
                    matching_observer.send_next(value);
                } else {
                    rest_observer.send_next(value);
                }
            }
            other => {
                matching_observer.send(other.clone());
                rest_observer.send(other);
            }
        });
        (matching, rest)
    }
}

impl<V, E> PartitionExt<V, E> for Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = Source<V, E>;

    fn partition<P>(&self, predicate: P) -> (Source<V, E>, Source<V, E>)
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.lift_pair(|signal| signal.partition(predicate))
    }
}
