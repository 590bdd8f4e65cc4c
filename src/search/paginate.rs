//! Pagination over a fully ordered result sequence

use crate::error::SearchError;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 24;

/// A bounded window over an ordered sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page number
    pub page: usize,
    pub page_size: usize,
    /// Size of the whole sequence the page was cut from
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

/// Number of pages needed for `total` elements; an empty sequence has one (empty) page
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

/// Cut page `page` (1-indexed) of `page_size` out of `items`.
///
/// Pages outside `1..=total_pages` are rejected with `SearchError::InvalidPage`,
/// never wrapped or clamped.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Result<Page<T>, SearchError> {
    if page_size == 0 {
        return Err(SearchError::Config("page size must be at least 1".to_string()));
    }

    let total = items.len();
    let pages = total_pages(total, page_size);

    if page < 1 || page > pages {
        return Err(SearchError::InvalidPage {
            requested: page,
            total_pages: pages,
        });
    }

    let offset = (page - 1) * page_size;
    let end = (offset + page_size).min(total);

    let items: Vec<T> = items.into_iter().skip(offset).take(end - offset).collect();

    Ok(Page {
        items,
        page,
        page_size,
        total,
        total_pages: pages,
        has_next: offset + page_size < total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_page_of_thirty() {
        let items: Vec<usize> = (0..30).collect();
        let page = paginate(items, 2, DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(page.items, (24..30).collect::<Vec<_>>());
        assert_eq!(page.total, 30);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);
        assert_eq!(page.offset(), 24);
    }

    #[test]
    fn test_first_page_has_next() {
        let items: Vec<usize> = (0..30).collect();
        let page = paginate(items, 1, DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(page.items.len(), 24);
        assert!(page.has_next);
    }

    #[test]
    fn test_exact_multiple() {
        let items: Vec<usize> = (0..48).collect();
        let page = paginate(items, 2, 24).unwrap();
        assert_eq!(page.items.len(), 24);
        assert!(!page.has_next);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_empty_sequence_has_one_page() {
        let page = paginate(Vec::<usize>::new(), 1, 24).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_zero_rejected() {
        let err = paginate(vec![1, 2, 3], 0, 24).unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidPage {
                requested: 0,
                total_pages: 1
            }
        ));
    }

    #[test]
    fn test_page_past_end_rejected() {
        let items: Vec<usize> = (0..30).collect();
        let err = paginate(items, 3, 24).unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidPage {
                requested: 3,
                total_pages: 2
            }
        ));
    }

    #[test]
    fn test_zero_page_size() {
        assert!(matches!(
            paginate(vec![1], 1, 0),
            Err(SearchError::Config(_))
        ));
    }
}
