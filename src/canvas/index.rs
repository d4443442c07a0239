//! Spatial index for hit-testing.
//!
//! Boxes are kept in insertion order and queried by point plus threshold.
//! The canvas holds few enough indexed primitives per layer that a flat scan
//! is all that's needed.

use crate::types::{Bounds, px};

#[derive(Debug, Clone)]
struct Entry<T> {
    owner: T,
    bounds: Bounds,
}

/// Axis-aligned boxes keyed by an owner value
#[derive(Debug, Clone)]
pub struct SpatialIndex<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> SpatialIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a box with top-left corner `(x, y)`
    pub fn put(&mut self, owner: T, x: i32, y: i32, width: i32, height: i32) {
        self.entries.push(Entry {
            owner,
            bounds: Bounds::from_origin_size(px(x, y), width, height),
        });
    }

    /// First owner whose box contains `(x, y)` within the thresholds
    pub fn get(&self, x: i32, x_threshold: i32, y: i32, y_threshold: i32) -> Option<&T> {
        self.query(x, x_threshold, y, y_threshold).next()
    }

    /// Every owner whose box contains `(x, y)` within the thresholds, in
    /// insertion order
    pub fn query(
        &self,
        x: i32,
        x_threshold: i32,
        y: i32,
        y_threshold: i32,
    ) -> impl Iterator<Item = &T> {
        self.entries
            .iter()
            .filter(move |e| e.bounds.contains_within(x, x_threshold, y, y_threshold))
            .map(|e| &e.owner)
    }

    /// Owners of all entries in insertion order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.owner)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let mut index = SpatialIndex::new();
        index.put("a", 0, 0, 10, 10);
        index.put("b", 5, 5, 10, 10);
        assert_eq!(index.get(7, 0, 7, 0), Some(&"a"));
        assert_eq!(index.get(12, 0, 12, 0), Some(&"b"));
        assert_eq!(index.query(7, 0, 7, 0).count(), 2);
    }

    #[test]
    fn miss_and_threshold() {
        let mut index = SpatialIndex::new();
        index.put(1, 10, 10, 4, 4);
        assert_eq!(index.get(20, 0, 20, 0), None);
        assert_eq!(index.get(17, 3, 12, 0), Some(&1));
    }

    #[test]
    fn clear_empties_values() {
        let mut index = SpatialIndex::new();
        index.put(1, 0, 0, 1, 1);
        index.put(2, 0, 0, 1, 1);
        assert_eq!(index.values().copied().collect::<Vec<_>>(), [1, 2]);
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.get(0, 0, 0, 0), None);
    }
}
