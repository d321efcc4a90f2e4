// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot multicast stream.
//!
//! A [`Signal`] runs its producer synchronously inside the constructor and
//! multicasts whatever the producer sends to every observer registered at
//! delivery time. It terminates on the first terminal event, or when its
//! cancel disposable is disposed.

use crate::bag::Bag;
use crate::disposable::{ActionDisposable, Disposable, DisposableHandle};
use crate::event::Event;
use crate::observer::Observer;
use crate::serial_disposable::SerialDisposable;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

pub(crate) struct SignalState<V, E> {
    observers: Bag<Observer<V, E>>,
    terminated: bool,
}

pub(crate) struct SignalCore<V, E> {
    state: Mutex<SignalState<V, E>>,
    producer: Arc<SerialDisposable>,
    cancel: OnceLock<DisposableHandle>,
}

impl<V, E> SignalCore<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(SignalState {
                observers: Bag::new(),
                terminated: false,
            }),
            producer: Arc::new(SerialDisposable::new()),
            cancel: OnceLock::new(),
        })
    }

    /// Multicasts `event` to the current observers.
    ///
    /// Delivery happens against a snapshot with the state lock released, so
    /// observers may re-enter freely (remove themselves, cancel the signal,
    /// attach new observers). A terminal event marks the signal terminated,
    /// empties the registry and tears the producer down.
    pub(crate) fn fan_out(&self, event: Event<V, E>) {
        let terminal = event.is_terminating();
        let snapshot = {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            let snapshot = state.observers.snapshot();
            if terminal {
                state.terminated = true;
                state.observers.clear();
            }
            snapshot
        };
        for observer in &snapshot {
            observer.send(event.clone());
        }
        if terminal {
            trace!("signal terminated, producer disposed");
            self.producer.dispose();
        }
    }
}

/// A hot multicast stream.
///
/// The producer closure handed to [`Signal::new`] runs immediately and
/// drives the internal observer; `Signal` itself only fans events out.
/// Handles are cheap `Arc`-backed clones with no drop side effect: a signal
/// lives until its first terminal event or until its
/// [`cancel disposable`](Signal::cancel_disposable) is disposed. Scope-bound
/// cancellation is available through
/// [`ScopedDisposable`](crate::ScopedDisposable).
///
/// # Examples
///
/// ```
/// use rivulet_core::Signal;
/// use std::sync::{Arc, Mutex};
///
/// let (signal, observer) = Signal::<i32, &str>::pipe();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// signal.on_next(move |value| sink.lock().unwrap().push(value));
///
/// observer.send_next(1);
/// observer.send_next(2);
/// observer.send_completed();
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
pub struct Signal<V, E> {
    core: Arc<SignalCore<V, E>>,
}

impl<V, E> Clone for Signal<V, E> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<V, E> Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates a signal and immediately invokes `start` with its internal
    /// observer.
    ///
    /// The disposable returned by `start` is disposed automatically when a
    /// terminal event is sent — including a terminal sent synchronously
    /// while `start` is still running.
    pub fn new<F>(start: F) -> Self
    where
        F: FnOnce(Observer<V, E>) -> Option<DisposableHandle>,
    {
        let core = SignalCore::new();
        let observer = Observer::holding_signal(&core);

        // The cancel disposable sends Interrupted through the internal
        // observer, then disposes whatever the producer returned.
        let cancel: DisposableHandle = {
            let observer = observer.clone();
            let producer = Arc::clone(&core.producer);
            Arc::new(ActionDisposable::new(move || {
                observer.send_interrupted();
                producer.dispose();
            }))
        };
        let _ = core.cancel.set(cancel);

        let handle = start(observer);
        // A producer that already terminated leaves the serial disposed, in
        // which case the handle is disposed right here.
        core.producer.set_inner(handle);

        Self { core }
    }

    /// Creates a producer-less signal driven purely by the returned
    /// observer.
    pub fn pipe() -> (Self, Observer<V, E>) {
        let mut captured = None;
        let signal = Self::new(|observer| {
            captured = Some(observer);
            None
        });
        let observer = captured.unwrap_or_else(|| unreachable!("pipe generator always runs"));
        (signal, observer)
    }

    /// A signal that immediately sends one value, then completes.
    pub fn from_value(value: V) -> Self {
        Self::new(|observer| {
            observer.send_next(value);
            observer.send_completed();
            None
        })
    }

    /// A signal that immediately fails with the given error.
    pub fn from_error(error: E) -> Self {
        Self::new(|observer| {
            observer.send_failed(error);
            None
        })
    }

    /// A signal that immediately sends the given values, then completes.
    ///
    /// Disposing the producer's disposable mid-delivery stops the emission.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self::new(|observer| {
            let disposed = Arc::new(AtomicBool::new(false));
            let handle: DisposableHandle = {
                let disposed = Arc::clone(&disposed);
                Arc::new(ActionDisposable::new(move || {
                    disposed.store(true, Ordering::Release);
                }))
            };
            for value in values {
                if disposed.load(Ordering::Acquire) {
                    break;
                }
                observer.send_next(value);
            }
            observer.send_completed();
            Some(handle)
        })
    }

    /// A signal that completes immediately without sending any values.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|observer| {
            observer.send_completed();
            None
        })
    }

    /// A signal that never sends any events.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_| None)
    }

    /// Attaches `observer` to receive any future events from this signal.
    ///
    /// Returns a disposable that detaches the observer again; disposing it
    /// has no effect on the signal itself. If the signal has already
    /// terminated, the observer immediately receives `Interrupted` and
    /// `None` is returned.
    pub fn add(&self, observer: Observer<V, E>) -> Option<DisposableHandle> {
        let token = {
            let mut state = self.core.state.lock();
            if state.terminated {
                None
            } else {
                Some(state.observers.insert(observer.clone()))
            }
        };
        let Some(token) = token else {
            trace!("observer attached after termination, interrupting");
            observer.send_interrupted();
            return None;
        };
        let weak = Arc::downgrade(&self.core);
        Some(Arc::new(ActionDisposable::new(move || {
            if let Some(core) = weak.upgrade() {
                core.state.lock().observers.remove(token);
            }
        })))
    }

    /// Attaches a callback observing every event.
    pub fn on<F>(&self, action: F) -> Option<DisposableHandle>
    where
        F: Fn(Event<V, E>) + Send + Sync + 'static,
    {
        self.add(Observer::new(action))
    }

    /// Attaches a callback observing `Next` values.
    pub fn on_next<F>(&self, next: F) -> Option<DisposableHandle>
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        self.add(Observer::with_next(next))
    }

    /// Attaches a callback observing the `Failed` event.
    pub fn on_failed<F>(&self, failed: F) -> Option<DisposableHandle>
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.add(Observer::with_failed(failed))
    }

    /// Attaches a callback observing the `Completed` event.
    pub fn on_completed<F>(&self, completed: F) -> Option<DisposableHandle>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.add(Observer::with_completed(completed))
    }

    /// Attaches a callback observing the `Interrupted` event.
    pub fn on_interrupted<F>(&self, interrupted: F) -> Option<DisposableHandle>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.add(Observer::with_interrupted(interrupted))
    }

    /// The disposable that cancels this signal: disposing it synchronously
    /// delivers `Interrupted` to the current observers and tears the
    /// producer down. Idempotent.
    #[must_use]
    pub fn cancel_disposable(&self) -> DisposableHandle {
        self.core
            .cancel
            .get()
            .cloned()
            .unwrap_or_else(|| unreachable!("cancel disposable is set during construction"))
    }

    /// Whether a terminal event has already been delivered.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.core.state.lock().terminated
    }

    /// Number of currently attached observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.core.state.lock().observers.len()
    }
}

impl<V, E> std::fmt::Debug for Signal<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("observers", &self.observer_count())
            .field("terminated", &self.is_terminated())
            .finish()
    }
}
