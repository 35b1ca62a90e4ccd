//! Keyframe storage and target search.
//!
//! Keyframes are kept in insertion order and are never removed. Timestamps do not
//! have to arrive sorted; every search considers the whole collection and resolves
//! equal timestamps in favour of the keyframe inserted first.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::keyframe::Keyframe;

/// Search direction along the timeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Insertion-ordered keyframes plus the anchor the engine interpolates from.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    keyframes: Vec<Keyframe<T>>,
    /// Unset until the first keyframe arrives; afterwards usually a synthesized
    /// keyframe rather than one of `keyframes`.
    current: Option<Keyframe<T>>,
    max_timestamp: Duration,
    /// Indices into `keyframes`, stably sorted by timestamp.
    #[cfg(feature = "sorted-index")]
    order: Vec<usize>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            keyframes: Vec::new(),
            current: None,
            max_timestamp: Duration::ZERO,
            #[cfg(feature = "sorted-index")]
            order: Vec::new(),
        }
    }
}

impl<T: Clone> Timeline<T> {
    /// Append a keyframe and return its insertion index. The first keyframe
    /// also becomes the anchor.
    pub fn push(&mut self, object: T, timestamp: Duration) -> usize {
        let index = self.keyframes.len();
        if self.current.is_none() {
            self.current = Some(Keyframe::new(object.clone(), timestamp));
        }
        self.keyframes.push(Keyframe::new(object, timestamp));
        self.max_timestamp = self.max_timestamp.max(timestamp);

        #[cfg(feature = "sorted-index")]
        {
            // After every equal timestamp, so ties stay in insertion order.
            let at = self
                .order
                .partition_point(|&i| self.keyframes[i].timestamp() <= timestamp);
            self.order.insert(at, index);
        }

        index
    }

    /// Point the anchor back at the first keyframe added.
    pub(crate) fn rewind(&mut self) -> Option<&Keyframe<T>> {
        let first = self.keyframes.first()?.clone();
        self.current = Some(first);
        self.current.as_ref()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// All keyframes in insertion order.
    #[inline]
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Keyframe<T>> {
        self.keyframes.get(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&Keyframe<T>> {
        self.keyframes.first()
    }

    /// The anchor keyframe.
    #[inline]
    pub fn current(&self) -> Option<&Keyframe<T>> {
        self.current.as_ref()
    }

    pub(crate) fn set_current(&mut self, anchor: Keyframe<T>) {
        self.current = Some(anchor);
    }

    /// Largest timestamp ever added. Informational: nominal cycle length.
    #[inline]
    pub fn max_timestamp(&self) -> Duration {
        self.max_timestamp
    }

    /// Nearest keyframe strictly after (forward) or strictly before (backward)
    /// the anchor. `None` when the anchor is unset or nothing lies that way.
    pub fn target(&self, direction: Direction) -> Option<usize> {
        let from = self.current.as_ref()?.timestamp();
        self.target_from(from, direction)
    }

    /// Same search as [`Timeline::target`] relative to an arbitrary instant.
    #[inline]
    pub fn target_from(&self, from: Duration, direction: Direction) -> Option<usize> {
        #[cfg(feature = "sorted-index")]
        {
            self.indexed_target(from, direction)
        }
        #[cfg(not(feature = "sorted-index"))]
        {
            self.scan_target(from, direction)
        }
    }

    /// Linear scan over every keyframe. Replacing the best candidate requires a
    /// strictly better timestamp, so the first of several equal ones wins.
    pub fn scan_target(&self, from: Duration, direction: Direction) -> Option<usize> {
        let mut best: Option<(usize, Duration)> = None;
        for (index, keyframe) in self.keyframes.iter().enumerate() {
            let at = keyframe.timestamp();
            let (eligible, better) = match (direction, best) {
                (Direction::Forward, None) => (at > from, true),
                (Direction::Forward, Some((_, best_at))) => (at > from, at < best_at),
                (Direction::Backward, None) => (at < from, true),
                (Direction::Backward, Some((_, best_at))) => (at < from, at > best_at),
            };
            if eligible && better {
                best = Some((index, at));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Binary search over the sorted index, with the same tie-break as
    /// [`Timeline::scan_target`].
    #[cfg(feature = "sorted-index")]
    pub fn indexed_target(&self, from: Duration, direction: Direction) -> Option<usize> {
        let at = |i: usize| self.keyframes[i].timestamp();
        match direction {
            Direction::Forward => {
                let first_after = self.order.partition_point(|&i| at(i) <= from);
                self.order.get(first_after).copied()
            }
            Direction::Backward => {
                let first_not_before = self.order.partition_point(|&i| at(i) < from);
                let latest = at(*self.order.get(first_not_before.checked_sub(1)?)?);
                let run_start = self.order.partition_point(|&i| at(i) < latest);
                self.order.get(run_start).copied()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn timeline(stamps: &[u64]) -> Timeline<u64> {
        let mut t = Timeline::new();
        for (i, s) in stamps.iter().enumerate() {
            t.push(i as u64, ms(*s));
        }
        t
    }

    #[test]
    fn test_first_push_sets_anchor() {
        let mut t = Timeline::new();
        assert!(t.current().is_none());
        t.push("a", ms(40));
        t.push("b", ms(0));
        let anchor = t.current().unwrap();
        assert_eq!(*anchor.object(), "a");
        assert_eq!(anchor.timestamp(), ms(40));
        assert_eq!(t.max_timestamp(), ms(40));
        assert_eq!(*t.get(1).unwrap().object(), "b");
        assert!(t.get(2).is_none());
    }

    #[test]
    fn test_unsorted_forward_search() {
        let t = timeline(&[0, 900, 300, 600]);
        assert_eq!(t.target_from(ms(0), Direction::Forward), Some(2));
        assert_eq!(t.target_from(ms(300), Direction::Forward), Some(3));
        assert_eq!(t.target_from(ms(899), Direction::Forward), Some(1));
        assert_eq!(t.target_from(ms(900), Direction::Forward), None);
    }

    #[test]
    fn test_unsorted_backward_search() {
        let t = timeline(&[0, 900, 300, 600]);
        assert_eq!(t.target_from(ms(1000), Direction::Backward), Some(1));
        assert_eq!(t.target_from(ms(600), Direction::Backward), Some(2));
        assert_eq!(t.target_from(ms(1), Direction::Backward), Some(0));
        assert_eq!(t.target_from(ms(0), Direction::Backward), None);
    }

    #[test]
    fn test_ties_resolve_to_first_inserted() {
        let t = timeline(&[0, 500, 500, 200, 200]);
        assert_eq!(t.target_from(ms(0), Direction::Forward), Some(3));
        assert_eq!(t.target_from(ms(200), Direction::Forward), Some(1));
        assert_eq!(t.target_from(ms(900), Direction::Backward), Some(1));
        assert_eq!(t.target_from(ms(500), Direction::Backward), Some(3));
    }

    #[test]
    fn test_target_follows_anchor() {
        let mut t = timeline(&[0, 100, 200]);
        assert_eq!(t.target(Direction::Forward), Some(1));
        t.set_current(Keyframe::new(99, ms(150)));
        assert_eq!(t.target(Direction::Forward), Some(2));
        assert_eq!(t.target(Direction::Backward), Some(1));
        t.rewind();
        assert_eq!(t.current().unwrap().timestamp(), ms(0));
    }

    #[test]
    fn test_empty_timeline_has_no_target() {
        let t: Timeline<u64> = Timeline::new();
        assert_eq!(t.target(Direction::Forward), None);
        assert_eq!(t.target(Direction::Backward), None);
    }

    #[cfg(feature = "sorted-index")]
    #[test]
    fn test_indexed_search_matches_scan() {
        let t = timeline(&[700, 0, 300, 300, 1200, 700, 50, 1200, 0]);
        for probe in [0, 1, 49, 50, 51, 299, 300, 301, 700, 701, 1199, 1200, 5000] {
            for direction in [Direction::Forward, Direction::Backward] {
                assert_eq!(
                    t.indexed_target(ms(probe), direction),
                    t.scan_target(ms(probe), direction),
                    "probe {probe}ms {direction:?}"
                );
            }
        }
    }
}
