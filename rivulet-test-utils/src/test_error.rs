// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Error type used by the workspace test suites.
///
/// The engine itself never interprets errors; this type only needs to be
/// cheap to construct, compare and clone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestError {
    /// A producer reported a failure.
    #[error("producer failed: {0}")]
    Producer(String),
    /// A transform rejected a value.
    #[error("rejected value: {0}")]
    Rejected(i64),
}

impl TestError {
    /// Shorthand for a `Producer` error.
    pub fn producer(message: impl Into<String>) -> Self {
        Self::Producer(message.into())
    }
}
