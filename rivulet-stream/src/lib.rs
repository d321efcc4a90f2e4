// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Composition operators for rivulet event streams.
//!
//! Each operator lives in its own module as an extension trait implemented
//! for both [`Signal`](rivulet_core::Signal) and
//! [`Source`](rivulet_core::Source). Signal implementations interpose a
//! transformed observer between producer and consumers; Source
//! implementations delegate through [`Source::lift`](rivulet_core::Source::lift),
//! so operators never duplicate producer logic.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod filter;
pub mod filter_map;
pub mod flat_map;
pub mod joined;
pub mod map;
pub mod map_error;
pub mod partition;
pub mod reduce;

pub use self::filter::FilterExt;
pub use self::filter_map::FilterMapExt;
pub use self::flat_map::FlatMapExt;
pub use self::joined::JoinedExt;
pub use self::map::MapExt;
pub use self::map_error::MapErrorExt;
pub use self::partition::PartitionExt;
pub use self::reduce::ReduceExt;
