use serde::{Deserialize, Serialize};

use super::{PageLinks, PaginationError};

/// Page size bounds for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_per_page: u64,
    pub max_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: 10,
            max_per_page: 100,
        }
    }
}

impl PaginationConfig {
    /// Resolves the `per_page` query value.
    ///
    /// Missing, non-numeric and non-positive values fall back to the default;
    /// values above the maximum are clamped to it.
    pub fn per_page(&self, raw: Option<&str>) -> u64 {
        match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
            Some(n) if n > 0 => (n as u64).min(self.max_per_page),
            _ => self.default_per_page,
        }
    }
}

/// A requested page, before it is checked against the row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(u64),
    Last,
}

impl PageNumber {
    /// Parses the `page` query value. Missing means the first page.
    pub fn parse(raw: Option<&str>) -> Result<Self, PaginationError> {
        let Some(raw) = raw.map(str::trim) else {
            return Ok(Self::Number(1));
        };
        if raw == "last" {
            return Ok(Self::Last);
        }
        match raw.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(Self::Number(n)),
            _ => Err(PaginationError::InvalidPage),
        }
    }
}

/// A page resolved against the total number of matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub per_page: u64,
    pub num_pages: u64,
}

impl PageWindow {
    /// Checks the requested page against `total` rows.
    ///
    /// An empty result still has a single, empty first page.
    pub fn resolve(page: PageNumber, per_page: u64, total: u64) -> Result<Self, PaginationError> {
        let per_page = per_page.max(1);
        let num_pages = total.div_ceil(per_page).max(1);
        let page = match page {
            PageNumber::Last => num_pages,
            PageNumber::Number(n) if n <= num_pages => n,
            PageNumber::Number(_) => return Err(PaginationError::InvalidPage),
        };

        Ok(Self {
            page,
            per_page,
            num_pages,
        })
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }

    /// Maximum number of rows on this page.
    pub fn limit(&self) -> u64 {
        self.per_page
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages
    }
}

/// The `pagination` block of a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub per_page: u64,
    pub page: u64,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// A page of items plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub pagination: PaginationMeta,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(window: PageWindow, total: u64, data: Vec<T>, links: &PageLinks) -> Self {
        let prev = window
            .has_previous()
            .then(|| links.for_page(window.page - 1));
        let next = window.has_next().then(|| links.for_page(window.page + 1));

        Self {
            pagination: PaginationMeta {
                total,
                per_page: window.per_page,
                page: window.page,
                prev,
                next,
            },
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_page_defaults_and_bounds() {
        let config = PaginationConfig::default();

        assert_eq!(config.per_page(None), 10);
        assert_eq!(config.per_page(Some("25")), 25);
        assert_eq!(config.per_page(Some("1000")), 100);
        assert_eq!(config.per_page(Some("0")), 10);
        assert_eq!(config.per_page(Some("-5")), 10);
        assert_eq!(config.per_page(Some("ten")), 10);
    }

    #[test]
    fn test_page_number_parse() {
        assert_eq!(PageNumber::parse(None), Ok(PageNumber::Number(1)));
        assert_eq!(PageNumber::parse(Some("3")), Ok(PageNumber::Number(3)));
        assert_eq!(PageNumber::parse(Some("last")), Ok(PageNumber::Last));
        assert_eq!(PageNumber::parse(Some("0")), Err(PaginationError::InvalidPage));
        assert_eq!(PageNumber::parse(Some("two")), Err(PaginationError::InvalidPage));
    }

    #[test]
    fn test_window_for_middle_page() {
        let window = PageWindow::resolve(PageNumber::Number(2), 10, 25).unwrap();

        assert_eq!(window.num_pages, 3);
        assert_eq!(window.offset(), 10);
        assert_eq!(window.limit(), 10);
        assert!(window.has_previous());
        assert!(window.has_next());
    }

    #[test]
    fn test_window_last_page() {
        let window = PageWindow::resolve(PageNumber::Last, 10, 25).unwrap();

        assert_eq!(window.page, 3);
        assert_eq!(window.offset(), 20);
        assert!(!window.has_next());
    }

    #[test]
    fn test_window_empty_result_has_one_page() {
        let window = PageWindow::resolve(PageNumber::Number(1), 10, 0).unwrap();

        assert_eq!(window.num_pages, 1);
        assert!(!window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn test_window_beyond_last_page_is_invalid() {
        assert_eq!(
            PageWindow::resolve(PageNumber::Number(4), 10, 30),
            Err(PaginationError::InvalidPage)
        );
        assert_eq!(
            PageWindow::resolve(PageNumber::Number(2), 10, 0),
            Err(PaginationError::InvalidPage)
        );
    }

    #[test]
    fn test_page_links() {
        let links = PageLinks::new("/users/", Vec::<(String, String)>::new());
        let window = PageWindow::resolve(PageNumber::Number(2), 10, 30).unwrap();

        let page = Page::new(window, 30, vec![11, 12], &links);

        assert_eq!(page.pagination.total, 30);
        assert_eq!(page.pagination.prev.as_deref(), Some("/users/"));
        assert_eq!(page.pagination.next.as_deref(), Some("/users/?page=3"));
    }

    #[test]
    fn test_single_page_has_no_links() {
        let links = PageLinks::new("/users/", Vec::<(String, String)>::new());
        let window = PageWindow::resolve(PageNumber::Number(1), 10, 3).unwrap();

        let page = Page::new(window, 3, vec![1, 2, 3], &links);

        assert!(page.pagination.prev.is_none());
        assert!(page.pagination.next.is_none());
    }
}
