//! Offset pagination primitives shared by the training tracker endpoints.
//!
//! Purpose: normalise raw `page`/`pageSize` query values into a
//! [`PageRequest`] and wrap result windows in a [`Paginated`] envelope whose
//! serialised shape is shared by every list endpoint.
//!
//! Clamping rules:
//! - a page below 1 becomes 1;
//! - a page size below 1 becomes [`DEFAULT_PAGE_SIZE`].
//!
//! # Examples
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::new(0, -5);
//! assert_eq!(request.page(), 1);
//! assert_eq!(request.page_size(), 10);
//!
//! let page = Paginated::new(vec!["a", "b"], request, 12);
//! assert_eq!(page.total_pages, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Page size applied when callers omit the value or send a non-positive one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// First page number; pages are one-based.
pub const FIRST_PAGE: u32 = 1;

/// Normalised offset pagination request.
///
/// ## Invariants
/// - `page >= 1`
/// - `page_size >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

fn clamp_positive(raw: i64, fallback: u32) -> u32 {
    if raw < 1 {
        fallback
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}

impl PageRequest {
    /// Build a request from raw, possibly non-positive values.
    #[must_use]
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: clamp_positive(page, FIRST_PAGE),
            page_size: clamp_positive(page_size, DEFAULT_PAGE_SIZE),
        }
    }

    /// Build a request from optional query values, defaulting missing ones.
    #[must_use]
    pub fn from_query(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self::new(
            page.unwrap_or(i64::from(FIRST_PAGE)),
            page_size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
        )
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.page_size))
    }

    /// Offset as a signed value for SQL `OFFSET` clauses.
    #[must_use]
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }

    /// Page size as a signed value for SQL `LIMIT` clauses.
    #[must_use]
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// Cut the contiguous window for this page out of an already sorted
    /// collection.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let window = PageRequest::new(2, 2).window(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(window, vec![3, 4]);
    /// ```
    #[must_use]
    pub fn window<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Number of pages needed to present `total_count` items.
#[must_use]
pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    total_count.div_ceil(u64::from(page_size.max(1)))
}

/// Paged response envelope.
///
/// Serialises as `{ items, page, pageSize, totalCount, totalPages }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Items on the current page.
    pub items: Vec<T>,
    /// One-based page number.
    pub page: u32,
    /// Requested page size after clamping.
    pub page_size: u32,
    /// Number of items across all pages.
    pub total_count: u64,
    /// `ceil(total_count / page_size)`.
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Wrap a page of items with the counters derived from `request`.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.page_size(),
            total_count,
            total_pages: total_pages(total_count, request.page_size()),
        }
    }

    /// Convert every item while keeping the counters.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}
