use std::marker::PhantomData;

use log::trace;
use sqlx::{sqlite::SqliteRow, FromRow, Pool, QueryBuilder, Sqlite};

use super::source::ChunkedSource;
use crate::{error::CandyError, guard};

/// Chunked source backed by a SQLite query.
///
/// Each [`fetch`](ChunkedSource::fetch) re-runs the query with a
/// `LIMIT`/`OFFSET` suffix and [`count`](ChunkedSource::count) wraps it in
/// `SELECT COUNT(*)`. The query should carry an `ORDER BY` clause so that
/// successive windows are stable.
///
/// The async driver is bridged with `tokio::task::block_in_place`, so the
/// source must be used from within a multi-threaded Tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use candy_rs::sequence::{chunk_select_range_from, SqliteChunkedSource};
/// use sqlx::SqlitePool;
///
/// # #[tokio::main(flavor = "multi_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = SqlitePool::connect("sqlite://accounts.db").await?;
/// let source = SqliteChunkedSource::<(i64, String)>::new(
///     pool,
///     "SELECT id, login FROM accounts ORDER BY id",
/// )?;
///
/// for chunk in chunk_select_range_from(&source, 500)? {
///     for (id, login) in chunk? {
///         println!("{id}: {login}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct SqliteChunkedSource<I> {
    pool: Pool<Sqlite>,
    query: String,
    _phantom: PhantomData<I>,
}

impl<I> SqliteChunkedSource<I>
where
    for<'r> I: FromRow<'r, SqliteRow> + Send + Unpin,
{
    /// # Errors
    ///
    /// Returns [`CandyError::InvalidArgument`] when `query` is empty.
    pub fn new(pool: Pool<Sqlite>, query: &str) -> Result<Self, CandyError> {
        guard::not_empty(query.trim(), "query")?;

        Ok(Self {
            pool,
            query: query.trim().trim_end_matches(';').to_string(),
            _phantom: PhantomData,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl<I> ChunkedSource for SqliteChunkedSource<I>
where
    for<'r> I: FromRow<'r, SqliteRow> + Send + Unpin,
{
    type Item = I;

    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<I>, CandyError> {
        let mut query_builder = QueryBuilder::<Sqlite>::new(&self.query);
        query_builder.push(format!(" LIMIT {} OFFSET {}", limit, offset));

        let sql = query_builder.sql();
        trace!("Fetching rows with: {}", sql);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                sqlx::query_as::<Sqlite, I>(sql)
                    .fetch_all(&self.pool)
                    .await
            })
        })
        .map_err(|err| CandyError::Source(err.to_string()))
    }

    fn count(&self) -> Result<usize, CandyError> {
        let sql = format!("SELECT COUNT(*) FROM ({})", self.query);

        let total = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                sqlx::query_scalar::<Sqlite, i64>(&sql)
                    .fetch_one(&self.pool)
                    .await
            })
        })
        .map_err(|err| CandyError::Source(err.to_string()))?;

        usize::try_from(total).map_err(|err| CandyError::Source(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::sequence::{chunk_select_from, chunk_select_range_from, PagedSequence};

    async fn setup_pool(rows: i64) -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query("CREATE TABLE numbers (id INTEGER PRIMARY KEY, label TEXT NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();

        for id in 0..rows {
            sqlx::query("INSERT INTO numbers (id, label) VALUES (?, ?)")
                .bind(id)
                .bind(format!("n{id}"))
                .execute(&pool)
                .await
                .unwrap();
        }

        pool
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn should_fetch_windows() {
        let pool = setup_pool(10).await;
        let source =
            SqliteChunkedSource::<(i64, String)>::new(pool, "SELECT id, label FROM numbers ORDER BY id;")
                .unwrap();

        assert_eq!(source.query(), "SELECT id, label FROM numbers ORDER BY id");
        assert_eq!(source.count().unwrap(), 10);

        let rows = source.fetch(8, 5).unwrap();
        assert_eq!(rows, vec![(8, "n8".to_string()), (9, "n9".to_string())]);
        assert!(source.fetch(10, 5).unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn should_chunk_query_results() {
        let pool = setup_pool(250).await;
        let source =
            SqliteChunkedSource::<(i64,)>::new(pool, "SELECT id FROM numbers ORDER BY id").unwrap();

        let mut sum = 0;
        for chunk in chunk_select_range_from(&source, 45).unwrap() {
            sum += chunk.unwrap().iter().map(|(id,)| id).sum::<i64>();
        }
        assert_eq!(sum, 31125);

        let sum: i64 = chunk_select_from(&source, 45)
            .unwrap()
            .map(|row| row.unwrap().0)
            .sum();
        assert_eq!(sum, 31125);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn should_page_query_results() {
        let pool = setup_pool(250).await;
        let source =
            SqliteChunkedSource::<(i64,)>::new(pool, "SELECT id FROM numbers ORDER BY id").unwrap();

        let page = PagedSequence::from_source(&source, 20, 13).unwrap();
        assert_eq!(page.total_pages(), 20);
        assert_eq!(page.items(), &[(247,), (248,), (249,)]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn invalid_query_should_surface_as_source_error() {
        let pool = setup_pool(0).await;
        let source =
            SqliteChunkedSource::<(i64,)>::new(pool, "SELECT id FROM missing_table").unwrap();

        assert!(matches!(source.count(), Err(CandyError::Source(_))));

        let results: Vec<_> = chunk_select_from(&source, 10).unwrap().collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_query_should_be_rejected() {
        let pool = setup_pool(0).await;
        let result = SqliteChunkedSource::<(i64,)>::new(pool, "   ");
        assert!(matches!(result, Err(CandyError::InvalidArgument { .. })));
    }
}
