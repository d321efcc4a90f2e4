// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold restartable stream.
//!
//! A [`Source`] stores its producer closure and invokes it once per
//! [`Source::start`]. Each run gets a fresh internal observer bound to it;
//! [`Source::stop`] or a producer-originated terminal event returns the
//! source to idle, after which it may be started again. Runs are fully
//! independent; subscribers registered in the source survive across runs.

use crate::bag::Bag;
use crate::disposable::{ActionDisposable, Disposable, DisposableHandle};
use crate::event::Event;
use crate::observer::Observer;
use crate::serial_disposable::SerialDisposable;
use crate::signal::Signal;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type StartHandler<V, E> = Box<dyn Fn(Observer<V, E>) -> Option<DisposableHandle> + Send + Sync>;

pub(crate) struct SourceState<V, E> {
    observers: Bag<Observer<V, E>>,
    /// The current run's producer disposable; disposed when the run ends.
    producer: Option<Arc<SerialDisposable>>,
    /// The current run's cancel disposable; its presence doubles as the
    /// "run in progress" flag.
    cancel: Option<DisposableHandle>,
}

pub(crate) struct SourceCore<V, E> {
    pub(crate) start_handler: StartHandler<V, E>,
    state: Mutex<SourceState<V, E>>,
}

impl<V, E> SourceCore<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Multicasts `event` to the current observers.
    ///
    /// As with signals, delivery runs against a snapshot with the lock
    /// released. A terminal event ends the current run: the run's producer
    /// and cancel disposables are disposed, returning the source to idle.
    /// The registry is left intact so subscribers survive a restart.
    pub(crate) fn fan_out(&self, event: Event<V, E>) {
        let terminal = event.is_terminating();
        let (snapshot, producer, cancel) = {
            let mut state = self.state.lock();
            let snapshot = state.observers.snapshot();
            if terminal {
                (snapshot, state.producer.take(), state.cancel.take())
            } else {
                (snapshot, None, None)
            }
        };
        for observer in &snapshot {
            observer.send(event.clone());
        }
        if terminal {
            trace!("source run terminated");
            if let Some(producer) = producer {
                producer.dispose();
            }
            if let Some(cancel) = cancel {
                cancel.dispose();
            }
        }
    }
}

/// A cold multicast stream with an explicit start/stop lifecycle.
///
/// # Examples
///
/// ```
/// use rivulet_core::Source;
/// use std::sync::{Arc, Mutex};
///
/// let source = Source::<i32, &str>::from_values(vec![1, 2, 3]);
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// source.start_with_next(move |value| sink.lock().unwrap().push(value));
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
/// ```
pub struct Source<V, E> {
    core: Arc<SourceCore<V, E>>,
}

impl<V, E> Clone for Source<V, E> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<V, E> Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates a source that will invoke `start_handler` once per
    /// [`start`](Source::start).
    pub fn new<F>(start_handler: F) -> Self
    where
        F: Fn(Observer<V, E>) -> Option<DisposableHandle> + Send + Sync + 'static,
    {
        Self {
            core: Arc::new(SourceCore {
                start_handler: Box::new(start_handler),
                state: Mutex::new(SourceState {
                    observers: Bag::new(),
                    producer: None,
                    cancel: None,
                }),
            }),
        }
    }

    /// A source that sends one value per run, then completes.
    pub fn from_value(value: V) -> Self {
        Self::new(move |observer| {
            observer.send_next(value.clone());
            observer.send_completed();
            None
        })
    }

    /// A source that fails every run with the given error.
    pub fn from_error(error: E) -> Self {
        Self::new(move |observer| {
            observer.send_failed(error.clone());
            None
        })
    }

    /// A source that replays the given values on every run, then completes.
    ///
    /// Disposing the run's producer disposable mid-delivery stops the
    /// emission.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: Clone + Send + Sync + 'static,
    {
        let values = values.into_iter();
        Self::new(move |observer| {
            let disposed = Arc::new(AtomicBool::new(false));
            let handle: DisposableHandle = {
                let disposed = Arc::clone(&disposed);
                Arc::new(ActionDisposable::new(move || {
                    disposed.store(true, Ordering::Release);
                }))
            };
            for value in values.clone() {
                if disposed.load(Ordering::Acquire) {
                    break;
                }
                observer.send_next(value);
            }
            observer.send_completed();
            Some(handle)
        })
    }

    /// A source whose runs complete immediately without sending values.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|observer| {
            observer.send_completed();
            None
        })
    }

    /// A source that never sends any events.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_| None)
    }

    /// A source that attempts `operation` once per run, sending its value
    /// then completing on success, or failing with its error.
    pub fn attempt<F>(operation: F) -> Self
    where
        F: Fn() -> Result<V, E> + Send + Sync + 'static,
    {
        Self::new(move |observer| {
            match operation() {
                Ok(value) => {
                    observer.send_next(value);
                    observer.send_completed();
                }
                Err(error) => observer.send_failed(error),
            }
            None
        })
    }

    /// Starts a new run if the source is idle; a no-op while running.
    ///
    /// Each run manufactures a fresh internal observer, invokes the stored
    /// producer closure, and installs a cancel disposable that interrupts
    /// the run's observers and disposes the producer's disposable. Racing
    /// `start` calls are decided under the state lock: the run's disposables
    /// are installed before the lock is released, so exactly one caller
    /// invokes the producer and the others return.
    pub fn start(&self) {
        let producer = Arc::new(SerialDisposable::new());
        let observer = Observer::holding_source(&self.core);
        let cancel: DisposableHandle = {
            let observer = observer.clone();
            let producer = Arc::clone(&producer);
            Arc::new(ActionDisposable::new(move || {
                observer.send_interrupted();
                producer.dispose();
            }))
        };
        {
            let mut state = self.core.state.lock();
            // A present cancel means a run is in progress or still tearing
            // down; the terminal fan-out clears it when the run ends.
            if state.cancel.is_some() {
                return;
            }
            state.producer = Some(Arc::clone(&producer));
            state.cancel = Some(cancel);
        }
        trace!("source starting");
        let handle = (self.core.start_handler)(observer);
        // A run that terminated synchronously inside the handler has already
        // disposed the serial; the handle is then disposed on assignment.
        producer.set_inner(handle);
    }

    /// Ends the current run by disposing its cancel disposable, which
    /// interrupts this run's observers and disposes the producer's
    /// disposable. Idempotent, and safe if the source was never started.
    pub fn stop(&self) {
        let cancel = self.core.state.lock().cancel.clone();
        if let Some(cancel) = cancel {
            trace!("source stopping");
            cancel.dispose();
        }
    }

    /// Whether a run is currently in progress.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.core
            .state
            .lock()
            .cancel
            .as_ref()
            .is_some_and(|cancel| !cancel.is_disposed())
    }

    /// The current run's cancel disposable, if a run is in progress.
    #[must_use]
    pub fn cancel_disposable(&self) -> Option<DisposableHandle> {
        self.core.state.lock().cancel.clone()
    }

    /// Attaches `observer` to receive events from current and future runs.
    ///
    /// Returns a disposable that detaches the observer again; disposing it
    /// has no effect on the source itself.
    pub fn add(&self, observer: Observer<V, E>) -> Option<DisposableHandle> {
        let token = self.core.state.lock().observers.insert(observer);
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

    /// Attaches `observer`, then starts the source.
    pub fn start_with(&self, observer: Observer<V, E>) -> Option<DisposableHandle> {
        let disposable = self.add(observer);
        self.start();
        disposable
    }

    /// Attaches a `Next` callback, then starts the source.
    pub fn start_with_next<F>(&self, next: F) -> Option<DisposableHandle>
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        self.start_with(Observer::with_next(next))
    }

    /// Attaches a `Failed` callback, then starts the source.
    pub fn start_with_failed<F>(&self, failed: F) -> Option<DisposableHandle>
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.start_with(Observer::with_failed(failed))
    }

    /// Attaches a `Completed` callback, then starts the source.
    pub fn start_with_completed<F>(&self, completed: F) -> Option<DisposableHandle>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.start_with(Observer::with_completed(completed))
    }

    /// Attaches an `Interrupted` callback, then starts the source.
    pub fn start_with_interrupted<F>(&self, interrupted: F) -> Option<DisposableHandle>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.start_with(Observer::with_interrupted(interrupted))
    }

    /// Builds a new source applying `transform` to the events of every run.
    ///
    /// The new source shares this source's producer closure: starting it
    /// pipes a fresh [`Signal::pipe`] through `transform`, attaches the
    /// downstream observer, and re-invokes the original producer. Operators
    /// therefore never duplicate producer logic, only the shaping of events.
    pub fn lift<U, F2, T>(&self, transform: T) -> Source<U, F2>
    where
        U: Clone + Send + Sync + 'static,
        F2: Clone + Send + Sync + 'static,
        T: Fn(Signal<V, E>) -> Signal<U, F2> + Send + Sync + 'static,
    {
        let core = Arc::clone(&self.core);
        Source::new(move |observer| {
            let (pipe_signal, pipe_observer) = Signal::pipe();
            let _ = transform(pipe_signal).add(observer);
            (core.start_handler)(pipe_observer)
        })
    }

    /// Two-output counterpart of [`lift`](Source::lift) for operators that
    /// split a stream.
    ///
    /// The pipe is created once at lift time and shared by both outputs, so
    /// each output's start re-invokes the same producer into the shared
    /// pipe.
    pub fn lift_pair<U, F2, T>(&self, transform: T) -> (Source<U, F2>, Source<U, F2>)
    where
        U: Clone + Send + Sync + 'static,
        F2: Clone + Send + Sync + 'static,
        T: FnOnce(Signal<V, E>) -> (Signal<U, F2>, Signal<U, F2>),
    {
        let (pipe_signal, pipe_observer) = Signal::pipe();
        let (left, right) = transform(pipe_signal);
        let left_source = {
            let core = Arc::clone(&self.core);
            let pipe_observer = pipe_observer.clone();
            Source::new(move |observer| {
                let _ = left.add(observer);
                (core.start_handler)(pipe_observer.clone())
            })
        };
        let right_source = {
            let core = Arc::clone(&self.core);
            Source::new(move |observer| {
                let _ = right.add(observer);
                (core.start_handler)(pipe_observer.clone())
            })
        };
        (left_source, right_source)
    }

    /// Number of currently attached observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.core.state.lock().observers.len()
    }
}

impl<V, E> std::fmt::Debug for Source<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("observers", &self.observer_count())
            .field("started", &self.is_started())
            .finish()
    }
}
