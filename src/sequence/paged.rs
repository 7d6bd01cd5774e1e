use log::debug;
use serde::Serialize;

use super::source::ChunkedSource;
use crate::{error::CandyError, guard};

/// The default current page.
pub const DEFAULT_CURRENT_PAGE: usize = 1;

/// The default size of the page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One page of an ordered sequence together with its paging metadata.
///
/// The page content is a window of the source: the items at positions
/// `(current_page - 1) * page_size` up to `current_page * page_size`,
/// clipped to the source length. The content is owned by the page, so
/// iterating it any number of times yields the same items.
///
/// # Examples
///
/// ```
/// use candy_rs::sequence::PagedSequence;
///
/// let page = PagedSequence::new(0..250, 20, 13, None).unwrap();
///
/// assert_eq!(page.total_pages(), 20);
/// assert_eq!(page.current_page(), 20);
/// assert_eq!(page.items(), &[247, 248, 249]);
/// assert!(!page.has_next_page());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedSequence<T> {
    items: Vec<T>,
    current_page: usize,
    page_size: usize,
    total_pages: usize,
}

fn validate(page: usize, page_size: usize) -> Result<(), CandyError> {
    guard::not_zero(page, "page")?;
    guard::not_zero(page_size, "page_size")
}

impl<T> PagedSequence<T> {
    /// Materializes page `page` of `source`.
    ///
    /// When `total_pages` is `None` or `Some(0)` it is computed as
    /// `ceil(count / page_size)` during the same pass over `source`, which
    /// then has to be walked to its end.
    ///
    /// # Errors
    ///
    /// Returns [`CandyError::InvalidArgument`] when `page` or `page_size` is zero.
    pub fn new<I>(
        source: I,
        page: usize,
        page_size: usize,
        total_pages: Option<usize>,
    ) -> Result<Self, CandyError>
    where
        I: IntoIterator<Item = T>,
    {
        validate(page, page_size)?;

        let offset = (page - 1).saturating_mul(page_size);

        let (items, total_pages) = match total_pages.filter(|total| *total > 0) {
            Some(total) => (
                source.into_iter().skip(offset).take(page_size).collect(),
                total,
            ),
            None => {
                let mut items = Vec::new();
                let mut count = 0usize;
                for item in source {
                    if count >= offset && count - offset < page_size {
                        items.push(item);
                    }
                    count += 1;
                }
                (items, count.div_ceil(page_size))
            }
        };

        debug!(
            "Materialized page {}/{} with {} items (page size {})",
            page,
            total_pages,
            items.len(),
            page_size
        );

        Ok(Self {
            items,
            current_page: page,
            page_size,
            total_pages,
        })
    }

    /// First page of `source` with the default page size.
    pub fn first_page<I>(source: I) -> Result<Self, CandyError>
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(source, DEFAULT_CURRENT_PAGE, DEFAULT_PAGE_SIZE, None)
    }

    /// Wraps items that already form the requested page.
    ///
    /// Nothing is sliced or counted: use it when the page was selected
    /// upstream (e.g. by the query itself) and only the metadata is missing.
    ///
    /// # Errors
    ///
    /// Returns [`CandyError::InvalidArgument`] when `page` or `page_size` is zero.
    pub fn create(
        items: Vec<T>,
        page: usize,
        page_size: usize,
        total_pages: usize,
    ) -> Result<Self, CandyError> {
        validate(page, page_size)?;

        Ok(Self {
            items,
            current_page: page,
            page_size,
            total_pages,
        })
    }

    /// Fetches page `page` from a re-queryable source.
    ///
    /// Issues one `count` and one `fetch` against `source`.
    pub fn from_source<S>(source: &S, page: usize, page_size: usize) -> Result<Self, CandyError>
    where
        S: ChunkedSource<Item = T> + ?Sized,
    {
        validate(page, page_size)?;

        let total_pages = source.count()?.div_ceil(page_size);
        let items = source.fetch((page - 1).saturating_mul(page_size), page_size)?;

        Self::create(items, page, page_size, total_pages)
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Current page. Starts from 1.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Max number of items on the page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a PagedSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for PagedSequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Pagination for anything iterable.
pub trait PagedExt: IntoIterator + Sized {
    /// # Examples
    ///
    /// ```
    /// use candy_rs::sequence::PagedExt;
    ///
    /// let page = vec!["a", "b", "c", "d", "e"].paged(2, 2).unwrap();
    /// assert_eq!(page.items(), &["c", "d"]);
    /// assert_eq!(page.total_pages(), 3);
    /// ```
    fn paged(self, page: usize, page_size: usize) -> Result<PagedSequence<Self::Item>, CandyError> {
        PagedSequence::new(self, page, page_size, None)
    }
}

impl<I: IntoIterator> PagedExt for I {}
