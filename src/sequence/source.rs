use crate::error::CandyError;

/// A re-queryable ordered source read one bounded window at a time.
///
/// Every call to [`fetch`](ChunkedSource::fetch) is a fresh evaluation of the
/// underlying source, which keeps the working set of a traversal bounded by
/// the window size at the price of one query per window.
pub trait ChunkedSource {
    type Item;

    /// Returns at most `limit` items starting at `offset`.
    ///
    /// An empty vector means the source holds nothing at or after `offset`.
    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<Self::Item>, CandyError>;

    /// Total number of items in the source.
    fn count(&self) -> Result<usize, CandyError>;
}

/// In-memory source over a borrowed slice.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a, T> {
    items: &'a [T],
}

impl<'a, T> SliceSource<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }
}

impl<'a, T> From<&'a [T]> for SliceSource<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Self::new(items)
    }
}

impl<T: Clone> ChunkedSource for SliceSource<'_, T> {
    type Item = T;

    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<T>, CandyError> {
        let start = offset.min(self.items.len());
        let end = start.saturating_add(limit).min(self.items.len());
        Ok(self.items[start..end].to_vec())
    }

    fn count(&self) -> Result<usize, CandyError> {
        Ok(self.items.len())
    }
}

/// Source over a lazily evaluated, re-enumerable iterator.
///
/// Each fetch clones the iterator and walks it from the beginning
/// (`skip(offset).take(limit)`), so the iterator is never consumed.
///
/// # Examples
///
/// ```
/// use candy_rs::sequence::{ChunkedSource, IterSource};
///
/// let squares = IterSource::new((0..10).map(|n| n * n));
/// assert_eq!(squares.fetch(2, 3).unwrap(), vec![4, 9, 16]);
/// assert_eq!(squares.count().unwrap(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator + Clone> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I: Iterator + Clone> ChunkedSource for IterSource<I> {
    type Item = I::Item;

    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<I::Item>, CandyError> {
        Ok(self.iter.clone().skip(offset).take(limit).collect())
    }

    fn count(&self) -> Result<usize, CandyError> {
        Ok(self.iter.clone().count())
    }
}
