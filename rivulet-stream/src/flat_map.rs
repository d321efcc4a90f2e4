// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Source-producing transformation operator.

use crate::joined::JoinedExt;
use crate::map::MapExt;
use rivulet_core::{Signal, Source};
use std::sync::Arc;

/// Extension trait providing the `flat_map` operator.
pub trait FlatMapExt<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// The stream type produced by this operator.
    type Output<U: Clone + Send + Sync + 'static>;

    /// Maps each `Next` value to a [`Source`] and merges the results with
    /// [`joined`](JoinedExt::joined) semantics: inner sources are started
    /// eagerly and their values interleave into one output stream.
    fn flat_map<U, F>(&self, transform: F) -> Self::Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> Source<U, E> + Send + Sync + 'static;
}

impl<V, E> FlatMapExt<V, E> for Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<U: Clone + Send + Sync + 'static> = Signal<U, E>;

    fn flat_map<U, F>(&self, transform: F) -> Signal<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> Source<U, E> + Send + Sync + 'static,
    {
        self.map(transform).joined()
    }
}

impl<V, E> FlatMapExt<V, E> for Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output<U: Clone + Send + Sync + 'static> = Source<U, E>;

    fn flat_map<U, F>(&self, transform: F) -> Source<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(V) -> Source<U, E> + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        self.lift(move |signal| {
            let transform = Arc::clone(&transform);
            signal.map(move |value| transform(value)).joined()
        })
    }
}
