// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Typed event sinks and the circuit breaker guarding stream lifetimes.

use crate::event::Event;
use crate::signal::SignalCore;
use crate::source::SourceCore;
use parking_lot::Mutex;
use std::sync::Arc;

/// The stream core a [`CircuitBreaker`] forwards into.
pub(crate) enum Target<V, E> {
    Signal(Arc<SignalCore<V, E>>),
    Source(Arc<SourceCore<V, E>>),
}

impl<V, E> Clone for Target<V, E> {
    fn clone(&self) -> Self {
        match self {
            Target::Signal(core) => Target::Signal(Arc::clone(core)),
            Target::Source(core) => Target::Source(Arc::clone(core)),
        }
    }
}

/// A circuit breaker holds the strong reference that keeps a stream alive
/// while its producer is in flight, and drops it the instant the first
/// terminal event passes through — "breaking the circuit" between producer,
/// stream and subscribers so the stream can be freed once no external holder
/// remains.
///
/// Taking the reference and checking for a terminal event happen under one
/// lock, which is also what enforces the at-most-once-terminal contract per
/// run: after a terminal event the circuit is open and every further event
/// is dropped on the floor.
pub(crate) enum CircuitBreaker<V, E> {
    /// A plain callback observer; no lifetime management involved.
    Action(Box<dyn Fn(Event<V, E>) + Send + Sync>),
    /// The internal observer of a stream, holding it strongly until the
    /// first terminal event.
    Held(Mutex<Option<Target<V, E>>>),
}

impl<V, E> CircuitBreaker<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn send(&self, event: Event<V, E>) {
        match self {
            CircuitBreaker::Action(action) => action(event),
            CircuitBreaker::Held(slot) => {
                let target = {
                    let mut held = slot.lock();
                    if event.is_terminating() {
                        held.take()
                    } else {
                        held.clone()
                    }
                };
                match target {
                    Some(Target::Signal(core)) => core.fan_out(event),
                    Some(Target::Source(core)) => core.fan_out(event),
                    // Circuit already open: the stream terminated earlier.
                    None => {}
                }
            }
        }
    }
}

/// A typed sink for [`Event`]s, typically attached to a [`Signal`] or
/// [`Source`].
///
/// Observers are cheap to clone; all clones share the same underlying
/// action.
///
/// # Examples
///
/// ```
/// use rivulet_core::{Event, Observer};
///
/// let observer = Observer::<i32, &str>::new(|event| {
///     if let Event::Next(value) = event {
///         assert_eq!(value, 7);
///     }
/// });
/// observer.send_next(7);
/// ```
///
/// [`Signal`]: crate::Signal
/// [`Source`]: crate::Source
pub struct Observer<V, E> {
    breaker: Arc<CircuitBreaker<V, E>>,
}

impl<V, E> Clone for Observer<V, E> {
    fn clone(&self) -> Self {
        Self {
            breaker: Arc::clone(&self.breaker),
        }
    }
}

impl<V, E> Observer<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates an observer dispatching every event to `action`.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(Event<V, E>) + Send + Sync + 'static,
    {
        Self {
            breaker: Arc::new(CircuitBreaker::Action(Box::new(action))),
        }
    }

    /// Creates an observer invoking `next` for `Next` events and ignoring
    /// everything else.
    pub fn with_next<F>(next: F) -> Self
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        Self::new(move |event| {
            if let Event::Next(value) = event {
                next(value);
            }
        })
    }

    /// Creates an observer invoking `failed` for `Failed` events and
    /// ignoring everything else.
    pub fn with_failed<F>(failed: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        Self::new(move |event| {
            if let Event::Failed(error) = event {
                failed(error);
            }
        })
    }

    /// Creates an observer invoking `completed` for the `Completed` event
    /// and ignoring everything else.
    pub fn with_completed<F>(completed: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move |event| {
            if let Event::Completed = event {
                completed();
            }
        })
    }

    /// Creates an observer invoking `interrupted` for the `Interrupted`
    /// event and ignoring everything else.
    pub fn with_interrupted<F>(interrupted: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move |event| {
            if let Event::Interrupted = event {
                interrupted();
            }
        })
    }

    /// Internal observer for a signal: holds the core strongly until the
    /// first terminal event.
    pub(crate) fn holding_signal(core: &Arc<SignalCore<V, E>>) -> Self {
        Self {
            breaker: Arc::new(CircuitBreaker::Held(Mutex::new(Some(Target::Signal(
                Arc::clone(core),
            ))))),
        }
    }

    /// Internal observer for one run of a source.
    pub(crate) fn holding_source(core: &Arc<SourceCore<V, E>>) -> Self {
        Self {
            breaker: Arc::new(CircuitBreaker::Held(Mutex::new(Some(Target::Source(
                Arc::clone(core),
            ))))),
        }
    }

    /// Puts any event into the observer.
    pub fn send(&self, event: Event<V, E>) {
        self.breaker.send(event);
    }

    /// Puts a `Next` event into the observer.
    pub fn send_next(&self, value: V) {
        self.send(Event::Next(value));
    }

    /// Puts a `Failed` event into the observer.
    pub fn send_failed(&self, error: E) {
        self.send(Event::Failed(error));
    }

    /// Puts a `Completed` event into the observer.
    pub fn send_completed(&self) {
        self.send(Event::Completed);
    }

    /// Puts an `Interrupted` event into the observer.
    pub fn send_interrupted(&self) {
        self.send(Event::Interrupted);
    }
}

impl<V, E> std::fmt::Debug for Observer<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}
