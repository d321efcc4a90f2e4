// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use rivulet_core::{ActionDisposable, DisposableHandle, Event, Observer, Signal};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn recording_observer<V, E>() -> (Observer<V, E>, Arc<Mutex<Vec<Event<V, E>>>>)
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let observer = Observer::new(move |event| sink.lock().push(event));
    (observer, events)
}

fn counting_handle() -> (DisposableHandle, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let handle: DisposableHandle = Arc::new(ActionDisposable::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    (handle, count)
}

#[test]
fn pipe_delivers_values_in_order() {
    let (signal, observer) = Signal::<i32, &str>::pipe();
    let (recorder, events) = recording_observer();
    signal.add(recorder);

    for value in [0, 3, 5, 2, -3] {
        observer.send_next(value);
    }
    observer.send_completed();

    assert_eq!(
        *events.lock(),
        vec![
            Event::Next(0),
            Event::Next(3),
            Event::Next(5),
            Event::Next(2),
            Event::Next(-3),
            Event::Completed,
        ]
    );
    assert!(signal.is_terminated());
}

#[test]
fn terminal_event_is_delivered_at_most_once() {
    let (signal, observer) = Signal::<i32, &str>::pipe();
    let (recorder, events) = recording_observer();
    signal.add(recorder);

    observer.send_completed();
    observer.send_completed();
    observer.send_failed("late");
    observer.send_next(7);

    assert_eq!(*events.lock(), vec![Event::Completed]);
    assert_eq!(signal.observer_count(), 0);
}

#[test]
fn failure_preempts_completion() {
    let (signal, observer) = Signal::<i32, &str>::pipe();
    let (recorder, events) = recording_observer();
    signal.add(recorder);

    observer.send_next(1);
    observer.send_failed("boom");
    observer.send_completed();

    assert_eq!(*events.lock(), vec![Event::Next(1), Event::Failed("boom")]);
}

#[test]
fn observer_attached_after_termination_is_interrupted() {
    let (signal, observer) = Signal::<i32, &str>::pipe();
    observer.send_completed();

    let (recorder, events) = recording_observer();
    assert!(signal.add(recorder).is_none());
    assert_eq!(*events.lock(), vec![Event::Interrupted]);
}

#[test]
fn cancel_interrupts_observers_and_disposes_producer() {
    let (handle, disposals) = counting_handle();
    let captured = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&captured);
    let signal: Signal<i32, &str> = Signal::new(move |observer| {
        *slot.lock() = Some(observer);
        Some(handle)
    });
    let (recorder, events) = recording_observer();
    signal.add(recorder);

    let cancel = signal.cancel_disposable();
    cancel.dispose();
    cancel.dispose();

    assert_eq!(*events.lock(), vec![Event::Interrupted]);
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
    assert!(signal.is_terminated());

    // The producer's observer goes dead after the terminal.
    let producer = captured.lock().take().unwrap();
    producer.send_next(9);
    assert!(events.lock().len() == 1);
}

#[test]
fn cancel_with_no_observers_still_disposes_producer() {
    let (handle, disposals) = counting_handle();
    let signal: Signal<i32, &str> = Signal::new(move |_| Some(handle));

    signal.cancel_disposable().dispose();

    assert_eq!(disposals.load(Ordering::SeqCst), 1);
    assert!(signal.is_terminated());
}

#[test]
fn detached_observer_receives_nothing_further() {
    let (signal, observer) = Signal::<i32, &str>::pipe();
    let (recorder, events) = recording_observer();
    let removal = signal.add(recorder).unwrap();

    observer.send_next(1);
    removal.dispose();
    observer.send_next(2);

    assert_eq!(*events.lock(), vec![Event::Next(1)]);
    assert_eq!(signal.observer_count(), 0);
}

#[test]
fn detaching_one_observer_leaves_the_others_attached() {
    let (signal, observer) = Signal::<i32, &str>::pipe();
    let (first, first_events) = recording_observer();
    let (second, second_events) = recording_observer();
    let removal = signal.add(first).unwrap();
    signal.add(second);

    observer.send_next(1);
    removal.dispose();
    observer.send_next(2);

    assert_eq!(*first_events.lock(), vec![Event::Next(1)]);
    assert_eq!(
        *second_events.lock(),
        vec![Event::Next(1), Event::Next(2)]
    );
}

#[test]
fn observer_may_detach_itself_during_delivery() {
    let (signal, observer) = Signal::<i32, &str>::pipe();
    let removal: Arc<Mutex<Option<DisposableHandle>>> = Arc::new(Mutex::new(None));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let slot = Arc::clone(&removal);
    let sink = Arc::clone(&seen);
    let handle = signal
        .on_next(move |value| {
            sink.lock().push(value);
            if let Some(handle) = slot.lock().take() {
                handle.dispose();
            }
        })
        .unwrap();
    *removal.lock() = Some(handle);

    observer.send_next(1);
    observer.send_next(2);

    assert_eq!(*seen.lock(), vec![1]);
}

#[test]
fn producer_terminating_synchronously_has_its_handle_disposed() {
    let (handle, disposals) = counting_handle();
    let signal: Signal<i32, &str> = Signal::new(move |observer| {
        observer.send_next(1);
        observer.send_completed();
        Some(handle)
    });

    assert!(signal.is_terminated());
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
}

#[test]
fn from_value_replays_nothing_for_late_observers() {
    let signal = Signal::<i32, &str>::from_value(5);
    let (recorder, events) = recording_observer();

    // The value was delivered during construction; a late observer only
    // learns the stream is over.
    assert!(signal.add(recorder).is_none());
    assert_eq!(*events.lock(), vec![Event::Interrupted]);
}

#[test]
fn from_values_terminates_during_construction() {
    // A hot stream emits while it is built; the values are gone by the time
    // any observer could attach.
    let signal = Signal::<i32, &str>::from_values([1, 2, 3]);
    assert!(signal.is_terminated());
    assert_eq!(signal.observer_count(), 0);
}

#[test]
fn empty_terminates_immediately() {
    let signal = Signal::<i32, &str>::empty();
    assert!(signal.is_terminated());
}

#[test]
fn from_error_terminates_immediately() {
    let signal = Signal::<i32, &str>::from_error("boom");
    assert!(signal.is_terminated());
}

#[test]
fn never_stays_open_until_cancelled() {
    let signal = Signal::<i32, &str>::never();
    let (recorder, events) = recording_observer();
    signal.add(recorder);

    assert!(!signal.is_terminated());
    signal.cancel_disposable().dispose();

    assert_eq!(*events.lock(), vec![Event::Interrupted]);
    assert!(signal.is_terminated());
}

#[test]
fn concurrent_senders_keep_per_sender_order_and_one_terminal() {
    let (signal, observer) = Signal::<(usize, u32), &str>::pipe();
    let (recorder, events) = recording_observer();
    signal.add(recorder);

    let threads: Vec<_> = (0..2)
        .map(|sender| {
            let observer = observer.clone();
            std::thread::spawn(move || {
                for sequence in 0..100u32 {
                    observer.send_next((sender, sequence));
                }
                observer.send_completed();
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    let events = events.lock();
    for sender in 0..2 {
        // Whatever made it through before the first terminal must be an
        // in-order prefix of that sender's sequence.
        let sequences: Vec<u32> = events
            .iter()
            .filter_map(|event| event.value())
            .filter(|(from, _)| *from == sender)
            .map(|(_, sequence)| *sequence)
            .collect();
        let expected: Vec<u32> = (0..sequences.len() as u32).collect();
        assert_eq!(sequences, expected);
    }
    let terminals = events.iter().filter(|event| event.is_terminating()).count();
    assert_eq!(terminals, 1);
}

#[test]
fn clones_share_the_same_stream() {
    let (signal, observer) = Signal::<i32, &str>::pipe();
    let clone = signal.clone();
    let (recorder, events) = recording_observer();
    clone.add(recorder);

    observer.send_next(4);

    assert_eq!(*events.lock(), vec![Event::Next(4)]);
    assert_eq!(signal.observer_count(), 1);
}
