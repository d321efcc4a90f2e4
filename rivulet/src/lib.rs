// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A minimal synchronous reactive stream engine.
//!
//! rivulet pushes typed [`Event`]s (`Next`, `Failed`, `Completed`,
//! `Interrupted`) through chains of transformations with deterministic
//! resource cleanup and cancellation. Two stream flavors exist:
//!
//! - [`Signal`] — hot: the producer runs at construction and events are
//!   multicast to whoever is subscribed when they happen.
//! - [`Source`] — cold: the producer is stored and re-run on every
//!   [`start`](Source::start); stop and restart as often as you like.
//!
//! Everything is synchronous: sending an event runs the whole downstream
//! chain on the caller's stack. The engine imposes no scheduler, no
//! threading model and no backpressure — waiting for external readiness is
//! the producer's business.
//!
//! # Examples
//!
//! ```
//! use rivulet_rx::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let (signal, observer) = Signal::<i32, &str>::pipe();
//! let even = Arc::new(Mutex::new(Vec::new()));
//! let sink = even.clone();
//! signal
//!     .filter(|value| value % 2 == 0)
//!     .map(|value| value * 10)
//!     .on_next(move |value| sink.lock().unwrap().push(value));
//!
//! for value in 0..5 {
//!     observer.send_next(value);
//! }
//! observer.send_completed();
//!
//! assert_eq!(*even.lock().unwrap(), vec![0, 20, 40]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub use rivulet_core::{
    ActionDisposable, Bag, Disposable, DisposableHandle, Event, Observer, ScopedDisposable,
    SerialDisposable, Signal, SimpleDisposable, Source, Token,
};
pub use rivulet_stream::{
    FilterExt, FilterMapExt, FlatMapExt, JoinedExt, MapErrorExt, MapExt, PartitionExt, ReduceExt,
};

/// Everything needed to build and compose streams.
pub mod prelude {
    pub use rivulet_core::{
        Disposable, DisposableHandle, Event, Observer, ScopedDisposable, SerialDisposable, Signal,
        Source,
    };
    pub use rivulet_stream::{
        FilterExt, FilterMapExt, FlatMapExt, JoinedExt, MapErrorExt, MapExt, PartitionExt,
        ReduceExt,
    };
}
