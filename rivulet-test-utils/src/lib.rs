// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities shared across the rivulet workspace.

pub mod dispose_counter;
pub mod recorder;
pub mod test_error;

pub use self::dispose_counter::DisposeCounter;
pub use self::recorder::EventRecorder;
pub use self::test_error::TestError;
