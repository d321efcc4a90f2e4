// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Signal, Source};
use rivulet_stream::MapExt;
use rivulet_test_utils::{EventRecorder, TestError};

#[test]
fn maps_values_and_passes_terminals_through() {
    let (signal, observer) = Signal::<i32, TestError>::pipe();
    let recorder = EventRecorder::new();
    signal.map(|value| value * 10).add(recorder.observer());

    observer.send_next(1);
    observer.send_next(2);
    observer.send_completed();

    assert_eq!(
        recorder.events(),
        vec![Event::Next(10), Event::Next(20), Event::Completed]
    );
}

#[test]
fn maps_to_a_different_value_type() {
    let (signal, observer) = Signal::<i32, TestError>::pipe();
    let recorder = EventRecorder::new();
    signal
        .map(|value| format!("#{value}"))
        .add(recorder.observer());

    observer.send_next(7);
    observer.send_failed(TestError::producer("boom"));

    assert_eq!(recorder.values(), vec!["#7".to_owned()]);
    assert_eq!(recorder.failure(), Some(TestError::producer("boom")));
}

#[test]
fn mapped_source_transforms_every_run() {
    let source = Source::<i32, TestError>::from_values([1, 2]);
    let mapped = source.map(|value| value + 100);
    let recorder = EventRecorder::new();
    mapped.add(recorder.observer());

    mapped.start();
    mapped.start();

    assert_eq!(recorder.values(), vec![101, 102, 101, 102]);
    assert_eq!(recorder.terminal_count(), 2);
    assert!(!mapped.is_started());
}
