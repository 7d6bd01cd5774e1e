use log::trace;

use super::source::ChunkedSource;
use crate::{error::CandyError, guard};

/// Chunk size used when the caller has no preference.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Breaks a slice into consecutive chunks of at most `chunk_size` items.
///
/// Each chunk is a view into `source`; the iterator stops once the remaining
/// part of the source is empty. Calling the function again restarts from the
/// first chunk.
///
/// # Errors
///
/// Returns [`CandyError::InvalidArgument`] when `chunk_size` is zero.
///
/// # Examples
///
/// ```
/// use candy_rs::sequence::chunk_select_range;
///
/// let items: Vec<i32> = (0..250).collect();
/// let sum: i32 = chunk_select_range(&items, 45)
///     .unwrap()
///     .map(|chunk| chunk.iter().sum::<i32>())
///     .sum();
/// assert_eq!(sum, 31125);
/// ```
pub fn chunk_select_range<T>(
    source: &[T],
    chunk_size: usize,
) -> Result<ChunkSelectRange<'_, T>, CandyError> {
    guard::not_zero(chunk_size, "chunk_size")?;
    Ok(ChunkSelectRange {
        remaining: source,
        chunk_size,
    })
}

/// Iterator returned by [`chunk_select_range`].
#[derive(Debug, Clone)]
pub struct ChunkSelectRange<'a, T> {
    remaining: &'a [T],
    chunk_size: usize,
}

impl<'a, T> Iterator for ChunkSelectRange<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let (chunk, rest) = self
            .remaining
            .split_at(self.chunk_size.min(self.remaining.len()));
        self.remaining = rest;
        Some(chunk)
    }
}

/// Walks a slice chunk by chunk and yields its items one at a time.
///
/// At every chunk boundary the next window `skip(position).take(chunk_size)`
/// is selected; iteration ends on the first empty window.
///
/// # Errors
///
/// Returns [`CandyError::InvalidArgument`] when `chunk_size` is zero.
pub fn chunk_select<T>(source: &[T], chunk_size: usize) -> Result<ChunkSelect<'_, T>, CandyError> {
    guard::not_zero(chunk_size, "chunk_size")?;
    Ok(ChunkSelect {
        source,
        chunk_size,
        position: 0,
        current: [].iter(),
        finished: false,
    })
}

/// Iterator returned by [`chunk_select`].
#[derive(Debug, Clone)]
pub struct ChunkSelect<'a, T> {
    source: &'a [T],
    chunk_size: usize,
    position: usize,
    current: std::slice::Iter<'a, T>,
    finished: bool,
}

impl<'a, T> Iterator for ChunkSelect<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            if self.finished {
                return None;
            }

            let start = self.position.min(self.source.len());
            let end = start.saturating_add(self.chunk_size).min(self.source.len());
            if start == end {
                self.finished = true;
                return None;
            }

            self.current = self.source[start..end].iter();
            self.position = self.position.saturating_add(self.chunk_size);
        }
    }
}

/// Breaks any iterator, single-pass ones included, into owned chunks.
///
/// Items are pulled from `source` as chunks are requested, so at most one
/// chunk is buffered. Unlike the slice and source variants the traversal
/// cannot be restarted: the iterator is consumed.
///
/// # Errors
///
/// Returns [`CandyError::InvalidArgument`] when `chunk_size` is zero.
///
/// # Examples
///
/// ```
/// use candy_rs::sequence::chunk_select_iter;
///
/// let lines = "a\nb\nc\nd\ne".lines();
/// let chunks: Vec<Vec<&str>> = chunk_select_iter(lines, 2).unwrap().collect();
/// assert_eq!(chunks, vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
/// ```
pub fn chunk_select_iter<I>(
    source: I,
    chunk_size: usize,
) -> Result<IterChunkSelect<I::IntoIter>, CandyError>
where
    I: IntoIterator,
{
    guard::not_zero(chunk_size, "chunk_size")?;
    Ok(IterChunkSelect {
        iter: source.into_iter(),
        chunk_size,
    })
}

/// Iterator returned by [`chunk_select_iter`].
#[derive(Debug)]
pub struct IterChunkSelect<I> {
    iter: I,
    chunk_size: usize,
}

impl<I: Iterator> Iterator for IterChunkSelect<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<I::Item> = self.iter.by_ref().take(self.chunk_size).collect();
        if chunk.is_empty() { None } else { Some(chunk) }
    }
}

/// Breaks a re-queryable source into chunks, one `fetch` per chunk.
///
/// The source is counted once, on the first call to `next`, and chunks are
/// fetched while the cursor is below that count. A failing `count` or
/// `fetch` is yielded once and ends the iteration.
///
/// # Errors
///
/// Returns [`CandyError::InvalidArgument`] when `chunk_size` is zero.
pub fn chunk_select_range_from<S>(
    source: &S,
    chunk_size: usize,
) -> Result<SourceChunkSelectRange<'_, S>, CandyError>
where
    S: ChunkedSource + ?Sized,
{
    guard::not_zero(chunk_size, "chunk_size")?;
    Ok(SourceChunkSelectRange {
        source,
        chunk_size,
        position: 0,
        total: None,
        finished: false,
    })
}

/// Iterator returned by [`chunk_select_range_from`].
pub struct SourceChunkSelectRange<'a, S: ?Sized> {
    source: &'a S,
    chunk_size: usize,
    position: usize,
    total: Option<usize>,
    finished: bool,
}

impl<S> Iterator for SourceChunkSelectRange<'_, S>
where
    S: ChunkedSource + ?Sized,
{
    type Item = Result<Vec<S::Item>, CandyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let total = match self.total {
            Some(total) => total,
            None => match self.source.count() {
                Ok(total) => {
                    self.total = Some(total);
                    total
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            },
        };

        if self.position >= total {
            self.finished = true;
            return None;
        }

        trace!(
            "Fetching chunk at offset {} (size {}, total {})",
            self.position,
            self.chunk_size,
            total
        );

        match self.source.fetch(self.position, self.chunk_size) {
            Ok(chunk) => {
                self.position = self.position.saturating_add(self.chunk_size);
                Some(Ok(chunk))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Walks a re-queryable source chunk by chunk and yields its items one at a time.
///
/// Each chunk boundary issues a fresh `fetch(position, chunk_size)`, so at
/// most one chunk is held in memory. Iteration ends on the first empty chunk.
/// A failing `fetch` is yielded once and ends the iteration.
///
/// # Errors
///
/// Returns [`CandyError::InvalidArgument`] when `chunk_size` is zero.
///
/// # Examples
///
/// ```
/// use candy_rs::sequence::{chunk_select_from, IterSource};
///
/// let source = IterSource::new(0..250);
/// let sum: i32 = chunk_select_from(&source, 45)
///     .unwrap()
///     .map(|item| item.unwrap())
///     .sum();
/// assert_eq!(sum, 31125);
/// ```
pub fn chunk_select_from<S>(
    source: &S,
    chunk_size: usize,
) -> Result<SourceChunkSelect<'_, S>, CandyError>
where
    S: ChunkedSource + ?Sized,
{
    guard::not_zero(chunk_size, "chunk_size")?;
    Ok(SourceChunkSelect {
        source,
        chunk_size,
        position: 0,
        buffer: Vec::new().into_iter(),
        finished: false,
    })
}

/// Iterator returned by [`chunk_select_from`].
pub struct SourceChunkSelect<'a, S>
where
    S: ChunkedSource + ?Sized,
{
    source: &'a S,
    chunk_size: usize,
    position: usize,
    buffer: std::vec::IntoIter<S::Item>,
    finished: bool,
}

impl<S> Iterator for SourceChunkSelect<'_, S>
where
    S: ChunkedSource + ?Sized,
{
    type Item = Result<S::Item, CandyError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }

            trace!(
                "Fetching chunk at offset {} (size {})",
                self.position,
                self.chunk_size
            );

            match self.source.fetch(self.position, self.chunk_size) {
                Ok(chunk) if chunk.is_empty() => {
                    self.finished = true;
                    return None;
                }
                Ok(chunk) => {
                    self.position = self.position.saturating_add(self.chunk_size);
                    self.buffer = chunk.into_iter();
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
