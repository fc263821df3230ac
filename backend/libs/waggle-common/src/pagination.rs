//! Pagination envelope shared by all listing endpoints

use serde::{Deserialize, Serialize};

/// Query parameters accepted by paginated endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    pub page_no: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Row offset for this page
    pub fn offset(&self) -> i64 {
        self.page_no * self.page_size
    }

    /// Reject negative page numbers and non-positive page sizes
    pub fn validate(&self) -> Result<(), String> {
        if self.page_no < 0 {
            return Err(format!("page_no must be >= 0, got {}", self.page_no));
        }
        if self.page_size < 1 {
            return Err(format!("page_size must be >= 1, got {}", self.page_size));
        }
        Ok(())
    }
}

/// A page of results plus paging metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub contents: Vec<T>,
    pub page_no: i64,
    pub page_size: i64,
    pub has_next: bool,
    pub is_last: bool,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Wrap one page of rows together with the total row count
    pub fn new(contents: Vec<T>, page_no: i64, page_size: i64, total_elements: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total_elements + page_size - 1) / page_size
        } else {
            0
        };
        // Pages past the end, and an empty result set, both count as last.
        let is_last = page_no + 1 >= total_pages;

        Self {
            contents,
            page_no,
            page_size,
            has_next: !is_last,
            is_last,
            total_elements,
            total_pages,
        }
    }

    /// An empty page with zero totals
    pub fn empty(page_no: i64, page_size: i64) -> Self {
        Self::new(Vec::new(), page_no, page_size, 0)
    }

    /// Map page contents to another type, keeping the metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            contents: self.contents.into_iter().map(f).collect(),
            page_no: self.page_no,
            page_size: self.page_size,
            has_next: self.has_next,
            is_last: self.is_last,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_25_by_10() {
        let page = Page::new((0..10).collect::<Vec<_>>(), 0, 10, 25);
        assert_eq!(page.contents.len(), 10);
        assert!(page.has_next);
        assert!(!page.is_last);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn last_page_of_25_by_10() {
        let page = Page::new((0..5).collect::<Vec<_>>(), 2, 10, 25);
        assert_eq!(page.contents.len(), 5);
        assert!(!page.has_next);
        assert!(page.is_last);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let page = Page::new((0..10).collect::<Vec<_>>(), 1, 10, 20);
        assert!(page.is_last);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn empty_result_set_is_a_single_last_page() {
        let page: Page<i32> = Page::empty(0, 10);
        assert!(page.is_last);
        assert!(!page.has_next);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn offset_is_page_times_size() {
        let req = PageRequest {
            page_no: 3,
            page_size: 25,
        };
        assert_eq!(req.offset(), 75);
    }

    #[test]
    fn rejects_bad_page_params() {
        assert!(PageRequest {
            page_no: -1,
            page_size: 10
        }
        .validate()
        .is_err());
        assert!(PageRequest {
            page_no: 0,
            page_size: 0
        }
        .validate()
        .is_err());
        assert!(PageRequest {
            page_no: 0,
            page_size: 10
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], 0, 10, 3).map(|n| n.to_string());
        assert_eq!(page.contents, vec!["1", "2", "3"]);
        assert!(page.is_last);
        assert_eq!(page.total_elements, 3);
    }
}
