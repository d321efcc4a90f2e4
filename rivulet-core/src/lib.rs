// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types for synchronous push-based event streams.
//!
//! A stream delivers [`Event`]s to [`Observer`]s registered in an
//! insertion-ordered [`Bag`]. Two stream flavors exist:
//!
//! - [`Signal`] is *hot*: its producer runs as soon as the signal is
//!   constructed, and late subscribers only see events sent after they
//!   subscribed.
//! - [`Source`] is *cold*: its producer is stored and invoked once per
//!   [`Source::start`], and the source can be stopped and restarted
//!   indefinitely.
//!
//! Delivery is purely synchronous: sending an event runs the entire
//! downstream chain on the caller's stack. There is no scheduler, no queue,
//! and no backpressure inside this crate.
//!
//! Resource cleanup is expressed through the [`Disposable`] hierarchy.
//! Disposing a stream's cancel disposable synchronously interrupts its
//! observers and releases the producer's resources.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod bag;
pub mod disposable;
pub mod event;
pub mod observer;
pub mod scoped_disposable;
pub mod serial_disposable;
pub mod signal;
pub mod source;

pub use self::bag::{Bag, Token};
pub use self::disposable::{ActionDisposable, Disposable, DisposableHandle, SimpleDisposable};
pub use self::event::Event;
pub use self::observer::Observer;
pub use self::scoped_disposable::ScopedDisposable;
pub use self::serial_disposable::SerialDisposable;
pub use self::signal::Signal;
pub use self::source::Source;
