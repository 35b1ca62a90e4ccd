//! A single timeline entry.

use std::time::Duration;

/// A payload pinned to an offset from timeline start.
///
/// Fields are private: a keyframe never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe<T> {
    object: T,
    timestamp: Duration,
}

impl<T> Keyframe<T> {
    #[inline]
    pub fn new(object: T, timestamp: Duration) -> Self {
        Self { object, timestamp }
    }

    #[inline]
    pub fn object(&self) -> &T {
        &self.object
    }

    #[inline]
    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    pub fn into_parts(self) -> (T, Duration) {
        (self.object, self.timestamp)
    }
}
