// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use rivulet_core::{Event, Observer};
use std::sync::Arc;

/// Records every event delivered to its [`observer`](EventRecorder::observer)
/// for later assertions.
pub struct EventRecorder<V, E> {
    events: Arc<Mutex<Vec<Event<V, E>>>>,
}

impl<V, E> Clone for EventRecorder<V, E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<V, E> Default for EventRecorder<V, E> {
    fn default() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<V, E> EventRecorder<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that appends every received event to this recorder.
    /// May be called multiple times; all observers feed the same log.
    #[must_use]
    pub fn observer(&self) -> Observer<V, E> {
        let events = Arc::clone(&self.events);
        Observer::new(move |event| events.lock().push(event))
    }

    /// Everything recorded so far, in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<Event<V, E>> {
        self.events.lock().clone()
    }

    /// The payloads of the recorded `Next` events, in delivery order.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| event.value().cloned())
            .collect()
    }

    /// The payload of the first recorded `Failed` event, if any.
    #[must_use]
    pub fn failure(&self) -> Option<E> {
        self.events
            .lock()
            .iter()
            .find_map(|event| event.error().cloned())
    }

    /// Whether a `Completed` event was recorded.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| matches!(event, Event::Completed))
    }

    /// Whether an `Interrupted` event was recorded.
    #[must_use]
    pub fn interrupted(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| matches!(event, Event::Interrupted))
    }

    /// Number of recorded terminal events.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| event.is_terminating())
            .count()
    }
}
