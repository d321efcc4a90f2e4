// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Signal, Source};
use rivulet_stream::FilterMapExt;
use rivulet_test_utils::{EventRecorder, TestError};

#[test]
fn keeps_only_values_the_transform_accepts() {
    let (signal, observer) = Signal::<&str, TestError>::pipe();
    let recorder = EventRecorder::new();
    signal
        .filter_map(|text: &str| text.parse::<i32>().ok())
        .add(recorder.observer());

    observer.send_next("12");
    observer.send_next("not a number");
    observer.send_next("-4");
    observer.send_completed();

    assert_eq!(
        recorder.events(),
        vec![Event::Next(12), Event::Next(-4), Event::Completed]
    );
}

#[test]
fn terminals_pass_through_untouched() {
    let (signal, observer) = Signal::<i32, TestError>::pipe();
    let recorder = EventRecorder::new();
    signal
        .filter_map(|_| None::<i32>)
        .add(recorder.observer());

    observer.send_next(1);
    observer.send_failed(TestError::Rejected(1));

    assert!(recorder.values().is_empty());
    assert_eq!(recorder.failure(), Some(TestError::Rejected(1)));
}

#[test]
fn source_transform_applies_per_run() {
    let source = Source::<i32, TestError>::from_values([1, 2, 3]);
    let halved = source.filter_map(|value| (value % 2 == 0).then_some(value / 2));
    let recorder = EventRecorder::new();
    halved.add(recorder.observer());

    halved.start();
    halved.start();

    assert_eq!(recorder.values(), vec![1, 1]);
    assert_eq!(recorder.terminal_count(), 2);
}
