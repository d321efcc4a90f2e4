// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Merge operator for streams of sources.

use parking_lot::Mutex;
use rivulet_core::{ActionDisposable, DisposableHandle, Event, Signal, Source};
use std::sync::Arc;

struct JoinState<U, E> {
    /// Streams still running, counting the outer stream itself.
    in_flight: usize,
    /// Every inner source started so far, kept so cancellation fans out.
    started: Vec<Source<U, E>>,
    /// Set once the merged output has terminated; late arrivals from the
    /// outer stream are then left unstarted.
    finished: bool,
}

impl<U, E> JoinState<U, E> {
    /// Returns `true` when the last in-flight stream just finished.
    fn finish_one(state: &Arc<Mutex<Self>>) -> bool {
        let mut state = state.lock();
        if state.finished {
            return false;
        }
        state.in_flight -= 1;
        if state.in_flight == 0 {
            state.finished = true;
            true
        } else {
            false
        }
    }
}

/// Extension trait providing the `joined` merge operator.
pub trait JoinedExt {
    /// The merged stream type.
    type Output;

    /// Merges a stream of [`Source`]s into a single stream.
    ///
    /// Each inner source is started as soon as it arrives (eager,
    /// unbuffered); its `Next` and `Failed` events are forwarded straight to
    /// the merged output, while its `Completed`/`Interrupted` only count it
    /// as finished. The outer stream's own `Failed` is forwarded immediately
    /// (fail-fast). The merged stream completes exactly when the outer
    /// stream and every inner source have finished.
    ///
    /// Disposing the merged stream's producer disposable stops every inner
    /// source still running.
    fn joined(&self) -> Self::Output;
}

impl<U, E> JoinedExt for Signal<Source<U, E>, E>
where
    U: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = Signal<U, E>;

    fn joined(&self) -> Signal<U, E> {
        Signal::new(|observer| {
            // The outer stream itself counts as one in-flight stream.
            let state = Arc::new(Mutex::new(JoinState {
                in_flight: 1,
                started: Vec::new(),
                finished: false,
            }));
            let _ = self.on({
                let state = Arc::clone(&state);
                let observer = observer.clone();
                move |event| match event {
                    Event::Next(inner) => {
                        {
                            let mut state = state.lock();
                            if state.finished {
                                return;
                            }
                            state.in_flight += 1;
                        }
                        let _ = inner.on({
                            let state = Arc::clone(&state);
                            let observer = observer.clone();
                            move |inner_event| match inner_event {
                                Event::Next(value) => observer.send_next(value),
                                Event::Failed(error) => observer.send_failed(error),
                                Event::Completed | Event::Interrupted => {
                                    if JoinState::finish_one(&state) {
                                        observer.send_completed();
                                    }
                                }
                            }
                        });
                        state.lock().started.push(inner.clone());
                        inner.start();
                        // Teardown may have raced the start; an inner that
                        // slipped in is stopped here rather than leaked.
                        if state.lock().finished {
                            inner.stop();
                        }
                    }
                    Event::Failed(error) => {
                        state.lock().finished = true;
                        observer.send_failed(error);
                    }
                    Event::Completed => {
                        if JoinState::finish_one(&state) {
                            observer.send_completed();
                        }
                    }
                    Event::Interrupted => {
                        state.lock().finished = true;
                        observer.send_interrupted();
                    }
                }
            });
            let cancel: DisposableHandle = Arc::new(ActionDisposable::new(move || {
                let started = {
                    let mut state = state.lock();
                    state.finished = true;
                    std::mem::take(&mut state.started)
                };
                for source in started {
                    source.stop();
                }
            }));
            Some(cancel)
        })
    }
}

impl<U, E> JoinedExt for Source<Source<U, E>, E>
where
    U: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = Source<U, E>;

    fn joined(&self) -> Source<U, E> {
        self.lift(|signal| signal.joined())
    }
}
