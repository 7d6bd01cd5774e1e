use std::cell::Cell;

use candy_rs::{
    error::CandyError,
    sequence::{
        chunk_select, chunk_select_from, chunk_select_range, chunk_select_range_from,
        ChunkedSource, IterSource, PagedExt, PagedSequence, SliceSource,
    },
};

#[cfg(feature = "rdbc-sqlite")]
use candy_rs::sequence::SqliteChunkedSource;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn numbers() -> Vec<i32> {
    (0..250).collect()
}

/// Source counting the fetches issued against it.
struct CountingSource {
    items: Vec<i32>,
    fetches: Cell<usize>,
}

impl ChunkedSource for CountingSource {
    type Item = i32;

    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<i32>, CandyError> {
        self.fetches.set(self.fetches.get() + 1);
        SliceSource::new(&self.items).fetch(offset, limit)
    }

    fn count(&self) -> Result<usize, CandyError> {
        Ok(self.items.len())
    }
}

#[test]
fn walk_every_page() -> anyhow::Result<()> {
    init_logger();

    let first = numbers().paged(1, 13)?;
    let mut seen = Vec::new();
    for page in 1..=first.total_pages() {
        let page = numbers().paged(page, 13)?;
        assert_eq!(page.has_previous_page(), page.current_page() > 1);
        seen.extend(page);
    }

    assert_eq!(first.total_pages(), 20);
    assert_eq!(seen, numbers());
    Ok(())
}

#[test]
fn page_past_the_end() -> anyhow::Result<()> {
    init_logger();

    let page = PagedSequence::new(numbers(), 13, 25, None)?;
    assert_eq!(page.total_pages(), 10);
    assert!(page.is_empty());
    Ok(())
}

#[test]
fn paging_a_source_matches_paging_memory() -> anyhow::Result<()> {
    init_logger();

    let items = numbers();
    let from_memory = PagedSequence::new(items.iter().copied(), 7, 30, None)?;
    let from_source = PagedSequence::from_source(&SliceSource::new(&items), 7, 30)?;

    assert_eq!(from_memory, from_source);
    Ok(())
}

#[test]
fn every_chunk_variant_sums_the_same() -> anyhow::Result<()> {
    init_logger();

    let items = numbers();
    let expected: i32 = items.iter().sum();
    assert_eq!(expected, 31125);

    let by_range: i32 = chunk_select_range(&items, 45)?
        .map(|chunk| chunk.iter().sum::<i32>())
        .sum();
    let by_item: i32 = chunk_select(&items, 45)?.sum();

    let lazy = IterSource::new(0..250);
    let mut by_source_range = 0;
    for chunk in chunk_select_range_from(&lazy, 45)? {
        by_source_range += chunk?.iter().sum::<i32>();
    }
    let by_source_item = chunk_select_from(&lazy, 45)?.sum::<Result<i32, CandyError>>()?;

    assert_eq!(by_range, expected);
    assert_eq!(by_item, expected);
    assert_eq!(by_source_range, expected);
    assert_eq!(by_source_item, expected);
    Ok(())
}

#[test]
fn chunked_traversal_fetches_once_per_chunk() -> anyhow::Result<()> {
    init_logger();

    let source = CountingSource {
        items: numbers(),
        fetches: Cell::new(0),
    };

    let chunks = chunk_select_range_from(&source, 100)?.collect::<Result<Vec<_>, _>>()?;
    assert_eq!(chunks.len(), 3);
    assert_eq!(source.fetches.get(), 3);

    // the flattening variant needs one more fetch to observe the end
    source.fetches.set(0);
    let count = chunk_select_from(&source, 100)?.count();
    assert_eq!(count, 250);
    assert_eq!(source.fetches.get(), 4);
    Ok(())
}

#[test]
fn zero_sizes_are_rejected() {
    init_logger();

    let items = numbers();
    assert!(matches!(
        chunk_select_range(&items, 0),
        Err(CandyError::InvalidArgument { .. })
    ));
    assert!(matches!(
        items.clone().paged(0, 10),
        Err(CandyError::InvalidArgument { .. })
    ));
    assert!(matches!(
        PagedSequence::create(items, 1, 0, 1),
        Err(CandyError::InvalidArgument { .. })
    ));
}

#[cfg(feature = "rdbc-sqlite")]
#[tokio::test(flavor = "multi_thread")]
async fn sqlite_rows_are_chunked_and_paged() -> anyhow::Result<()> {
    use sqlx::sqlite::SqlitePoolOptions;

    init_logger();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::query("CREATE TABLE person (id INTEGER PRIMARY KEY, first_name TEXT NOT NULL)")
        .execute(&pool)
        .await?;
    for id in 1..=30_i64 {
        sqlx::query("INSERT INTO person (id, first_name) VALUES (?, ?)")
            .bind(id)
            .bind(format!("person-{id}"))
            .execute(&pool)
            .await?;
    }

    let source = SqliteChunkedSource::<(i64, String)>::new(
        pool,
        "SELECT id, first_name FROM person ORDER BY id",
    )?;

    let chunks = chunk_select_range_from(&source, 8)?.collect::<Result<Vec<_>, _>>()?;
    assert_eq!(
        chunks.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![8, 8, 8, 6]
    );

    let page = PagedSequence::from_source(&source, 2, 25)?;
    assert_eq!(page.total_pages(), 2);
    assert_eq!(page.len(), 5);
    assert_eq!(page.items()[0], (26, "person-26".to_string()));
    Ok(())
}
