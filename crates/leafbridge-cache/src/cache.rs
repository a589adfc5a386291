use crate::Result;
use crate::compact::{compact_in_place, compact_sorted};

/// Dense, position-addressed cache of leaves or proofs.
#[derive(Debug, Clone)]
pub struct LeafCache<T> {
    entries: Vec<T>,
}

impl<T> Default for LeafCache<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> LeafCache<T> {
    /// Constructs an empty [`LeafCache`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an empty [`LeafCache`] able to hold `capacity` entries
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `entry`, returning its position.
    pub fn push(&mut self, entry: T) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Returns the ascending positions of the entries matching `predicate`.
    pub fn positions_where(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| predicate(entry).then_some(position))
            .collect()
    }

    /// Drops the entries at `positions` in one compaction.
    ///
    /// `positions` must be strictly ascending and in range, otherwise the cache
    /// is left unchanged and an error is returned.
    pub fn remove_positions(&mut self, positions: &[usize]) -> Result<()> {
        compact_in_place(&mut self.entries, positions)?;
        tracing::trace!(
            "Removed {} cache entries, {} left",
            positions.len(),
            self.entries.len()
        );
        Ok(())
    }

    /// Drops every entry matching `predicate`, returning how many were dropped.
    pub fn remove_where(&mut self, predicate: impl FnMut(&T) -> bool) -> usize {
        let positions = self.positions_where(predicate);
        compact_sorted(&mut self.entries, &positions);
        positions.len()
    }
}

impl<T> Extend<T> for LeafCache<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<T> FromIterator<T> for LeafCache<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_push_and_get() {
        let mut cache = LeafCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.push("a"), 0);
        assert_eq!(cache.push("b"), 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1), Some(&"b"));
        assert_eq!(cache.get(2), None);
    }

    #[test]
    fn test_remove_positions_renumbers() {
        let mut cache = (0..8).collect::<LeafCache<u32>>();
        cache.remove_positions(&[2, 5]).unwrap();

        assert_eq!(cache.as_slice(), &[0, 1, 3, 4, 6, 7]);
        // Entries before the first removal keep their position.
        assert_eq!(cache.get(1), Some(&1));
        assert_eq!(cache.get(2), Some(&3));
        assert_eq!(cache.get(4), Some(&6));
    }

    #[test]
    fn test_remove_positions_rejects_bad_input() {
        let mut cache = (0..4).collect::<LeafCache<u32>>();
        assert_eq!(
            cache.remove_positions(&[1, 1]),
            Err(Error::InvalidPositions {
                index: 1,
                position: 1,
                len: 4
            })
        );
        assert_eq!(cache.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_remove_where() {
        let mut cache = LeafCache::with_capacity(10);
        cache.extend(0..10u32);

        assert_eq!(cache.positions_where(|n| n % 3 == 0), vec![0, 3, 6, 9]);
        assert_eq!(cache.remove_where(|n| n % 3 == 0), 4);
        assert_eq!(
            cache.iter().copied().collect::<Vec<_>>(),
            vec![1, 2, 4, 5, 7, 8]
        );
        assert_eq!(cache.remove_where(|_| false), 0);
        assert_eq!(cache.len(), 6);
    }
}
