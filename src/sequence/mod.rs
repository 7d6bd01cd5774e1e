//! Paged and chunked views over ordered sequences.
//!
//! A [`PagedSequence`] materializes one page of a source together with the
//! paging metadata. The chunk iterators ([`chunk_select_range`],
//! [`chunk_select`] and their `_from` variants for [`ChunkedSource`]s) walk a
//! whole source one bounded window at a time. Single-pass iterators go
//! through [`chunk_select_iter`].

/// Re-queryable sources read in windows.
pub mod source;

/// One materialized page of a sequence.
pub mod paged;

/// Chunked traversal of slices and sources.
pub mod chunk;

/// SQLite backed source.
#[cfg(feature = "rdbc-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "rdbc-sqlite")))]
pub mod sqlite;

pub use chunk::{
    chunk_select, chunk_select_from, chunk_select_iter, chunk_select_range,
    chunk_select_range_from, ChunkSelect, ChunkSelectRange, IterChunkSelect, SourceChunkSelect,
    SourceChunkSelectRange, DEFAULT_CHUNK_SIZE,
};
pub use paged::{PagedExt, PagedSequence, DEFAULT_CURRENT_PAGE, DEFAULT_PAGE_SIZE};
pub use source::{ChunkedSource, IterSource, SliceSource};

#[cfg(feature = "rdbc-sqlite")]
pub use sqlite::SqliteChunkedSource;
