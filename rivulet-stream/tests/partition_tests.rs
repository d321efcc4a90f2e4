// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Signal, Source};
use rivulet_stream::PartitionExt;
use rivulet_test_utils::{EventRecorder, TestError};

#[test]
fn each_value_lands_on_exactly_one_side() {
    let (signal, observer) = Signal::<i32, TestError>::pipe();
    let (evens, odds) = signal.partition(|value| value % 2 == 0);
    let even_recorder = EventRecorder::new();
    let odd_recorder = EventRecorder::new();
    evens.add(even_recorder.observer());
    odds.add(odd_recorder.observer());

    for value in [0, 3, 5, 2, -3] {
        observer.send_next(value);
    }

    assert_eq!(even_recorder.values(), vec![0, 2]);
    assert_eq!(odd_recorder.values(), vec![3, 5, -3]);
}

#[test]
fn completion_reaches_both_sides_exactly_once() {
    let (signal, observer) = Signal::<i32, TestError>::pipe();
    let (matching, rest) = signal.partition(|value| *value > 0);
    let matching_recorder = EventRecorder::new();
    let rest_recorder = EventRecorder::new();
    matching.add(matching_recorder.observer());
    rest.add(rest_recorder.observer());

    observer.send_completed();
    observer.send_completed();

    assert_eq!(matching_recorder.events(), vec![Event::Completed]);
    assert_eq!(rest_recorder.events(), vec![Event::Completed]);
}

#[test]
fn failure_reaches_both_sides() {
    let (signal, observer) = Signal::<i32, TestError>::pipe();
    let (matching, rest) = signal.partition(|value| *value > 0);
    let matching_recorder = EventRecorder::new();
    let rest_recorder = EventRecorder::new();
    matching.add(matching_recorder.observer());
    rest.add(rest_recorder.observer());

    observer.send_next(1);
    observer.send_failed(TestError::producer("boom"));

    assert_eq!(matching_recorder.values(), vec![1]);
    assert_eq!(
        matching_recorder.failure(),
        Some(TestError::producer("boom"))
    );
    assert_eq!(rest_recorder.failure(), Some(TestError::producer("boom")));
    assert!(rest_recorder.values().is_empty());
}

#[test]
fn partitioned_source_splits_the_shared_run() {
    let slot = std::sync::Arc::new(parking_lot::Mutex::new(None));
    let producer_slot = std::sync::Arc::clone(&slot);
    let source: Source<i32, TestError> = Source::new(move |observer| {
        *producer_slot.lock() = Some(observer);
        None
    });

    let (evens, odds) = source.partition(|value| value % 2 == 0);
    let even_recorder = EventRecorder::new();
    let odd_recorder = EventRecorder::new();
    evens.add(even_recorder.observer());
    odds.add(odd_recorder.observer());

    // Both outputs share one upstream pipe; each one is started on its own.
    evens.start();
    odds.start();
    let upstream = slot.lock().clone().unwrap();
    for value in [1, 2, 3, 4] {
        upstream.send_next(value);
    }
    upstream.send_completed();

    assert_eq!(even_recorder.values(), vec![2, 4]);
    assert_eq!(odd_recorder.values(), vec![1, 3]);
    assert!(even_recorder.completed());
    assert!(odd_recorder.completed());
    assert!(!evens.is_started());
    assert!(!odds.is_started());
}
