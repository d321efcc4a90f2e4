// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// A single occurrence pushed through a stream.
///
/// `Completed`, `Failed` and `Interrupted` are *terminal*: they end the
/// subscription they are delivered on, and at most one of them reaches any
/// given observer per subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<V, E> {
    /// A value produced by the stream.
    Next(V),
    /// The stream failed with an error and will send nothing further.
    Failed(E),
    /// The stream finished successfully and will send nothing further.
    Completed,
    /// The stream was cancelled before it could finish.
    Interrupted,
}

impl<V, E> Event<V, E> {
    /// Returns `true` for `Failed`, `Completed` and `Interrupted`.
    pub const fn is_terminating(&self) -> bool {
        match self {
            Event::Next(_) => false,
            Event::Failed(_) | Event::Completed | Event::Interrupted => true,
        }
    }

    /// Borrows the payload of a `Next` event.
    pub const fn value(&self) -> Option<&V> {
        match self {
            Event::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the payload of a `Failed` event.
    pub const fn error(&self) -> Option<&E> {
        match self {
            Event::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Consumes the event, yielding the payload of a `Next` event.
    pub fn into_value(self) -> Option<V> {
        match self {
            Event::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Transforms the payload of a `Next` event, passing every other event
    /// through unchanged.
    pub fn map<U, F>(self, transform: F) -> Event<U, E>
    where
        F: FnOnce(V) -> U,
    {
        match self {
            Event::Next(value) => Event::Next(transform(value)),
            Event::Failed(error) => Event::Failed(error),
            Event::Completed => Event::Completed,
            Event::Interrupted => Event::Interrupted,
        }
    }

    /// Transforms the payload of a `Failed` event, passing every other event
    /// through unchanged.
    pub fn map_error<F2, G>(self, transform: G) -> Event<V, F2>
    where
        G: FnOnce(E) -> F2,
    {
        match self {
            Event::Next(value) => Event::Next(value),
            Event::Failed(error) => Event::Failed(transform(error)),
            Event::Completed => Event::Completed,
            Event::Interrupted => Event::Interrupted,
        }
    }

    /// Transforms the payload of a `Next` event through an optional
    /// transform. A `Next` whose transform returns `None` disappears;
    /// terminal events always pass through as `Some`.
    pub fn filter_map<U, F>(self, transform: F) -> Option<Event<U, E>>
    where
        F: FnOnce(V) -> Option<U>,
    {
        match self {
            Event::Next(value) => transform(value).map(Event::Next),
            Event::Failed(error) => Some(Event::Failed(error)),
            Event::Completed => Some(Event::Completed),
            Event::Interrupted => Some(Event::Interrupted),
        }
    }
}
